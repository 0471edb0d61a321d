//! Build the JSON course tree

use anyhow::Result;

use crate::generator::Generator;
use crate::CourseCms;

/// Load, render and sort every course, then write the output tree
pub async fn run(cms: &CourseCms) -> Result<()> {
    let start = std::time::Instant::now();

    let courses = cms.loader().load_courses().await?;
    let sections: usize = courses.iter().map(|c| c.sections.len()).sum();
    tracing::info!("Loaded {} courses and {} sections", courses.len(), sections);

    let files = Generator::new(&cms.output_dir).generate(&courses).await?;

    let duration = start.elapsed();
    tracing::info!(
        "Wrote {} files to {:?} in {:.2}s",
        files,
        cms.output_dir,
        duration.as_secs_f64()
    );

    Ok(())
}
