//! Validate content without rendering or writing

use anyhow::Result;

use crate::content::ValidationReport;
use crate::CourseCms;

/// Check the front-matter and body of every course and section file
pub async fn run(cms: &CourseCms) -> Result<ValidationReport> {
    let report = cms.loader().validate().await?;
    tracing::info!(
        "Validated {} course files and {} section files",
        report.courses,
        report.sections
    );
    Ok(report)
}
