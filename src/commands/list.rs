//! List courses and their sections

use anyhow::Result;

use crate::content::Course;
use crate::CourseCms;

/// Print every course in build order, with its sections
pub async fn run(cms: &CourseCms) -> Result<()> {
    let courses = cms.loader().load_courses().await?;
    print!("{}", format_listing(&courses));
    Ok(())
}

fn format_listing(courses: &[Course]) -> String {
    let mut out = format!("Courses ({}):\n", courses.len());
    for course in courses {
        let date = course
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unpublished".to_string());
        out.push_str(&format!(
            "  {} - {} [{}] ({} sections)\n",
            date,
            course.title,
            course.slug,
            course.sections.len()
        ));
        for section in &course.sections {
            out.push_str(&format!(
                "    {:>4} {} [{}]\n",
                section.order, section.title, section.slug
            ));
        }
    }
    out
}
