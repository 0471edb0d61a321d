//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::CourseCms;

/// Remove the output directory if it exists
pub fn run(cms: &CourseCms) -> Result<()> {
    if cms.output_dir.exists() {
        fs::remove_dir_all(&cms.output_dir)?;
        tracing::info!("Deleted: {:?}", cms.output_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_output() {
        let dir = TempDir::new().unwrap();
        let cms = CourseCms::new(dir.path()).unwrap();
        fs::create_dir_all(cms.output_dir.join("rust")).unwrap();
        fs::write(cms.output_dir.join("index.json"), "[]").unwrap();

        run(&cms).unwrap();
        assert!(!cms.output_dir.exists());

        // Nothing to delete is fine
        run(&cms).unwrap();
    }
}
