//! course-cms: builds a JSON course tree from Markdown content
//!
//! Each course is a directory holding an `index.md` and one Markdown file
//! per section. Front-matter is validated against a fixed schema, bodies are
//! rendered to HTML, and the result is written as a tree of `index.json`
//! files for a separate presentation layer to consume.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::BuildError;

/// The main application
#[derive(Debug, Clone)]
pub struct CourseCms {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Course (input) directory
    pub course_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
}

impl CourseCms {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Create a new instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Result<Self> {
        config.validate()?;

        let base_dir = base_dir.as_ref().to_path_buf();
        let course_dir = base_dir.join(&config.course_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Ok(Self {
            config,
            base_dir,
            course_dir,
            output_dir,
        })
    }

    /// Override the asset origin
    pub fn with_origin(mut self, origin: &str) -> Result<Self> {
        self.config.origin = origin.to_string();
        self.config.validate()?;
        Ok(self)
    }

    /// Override the output directory; relative paths are taken from the base directory
    pub fn with_output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = self.base_dir.join(output_dir);
        self
    }

    /// Loader for this site's course directory
    pub fn loader(&self) -> content::CourseLoader {
        content::CourseLoader::new(&self.course_dir, &self.config)
    }

    /// Build the JSON tree
    pub async fn build(&self) -> Result<()> {
        commands::build::run(self).await
    }

    /// Validate content without writing anything
    pub async fn validate(&self) -> Result<content::ValidationReport> {
        commands::validate::run(self).await
    }

    /// Remove the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
