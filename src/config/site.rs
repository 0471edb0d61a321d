//! Site configuration (_config.yml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::helpers::url::is_absolute_http_url;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute origin that local asset references are resolved against
    pub origin: String,
    /// Path prefix that marks a reference as a local asset
    pub asset_prefix: String,

    // Directory
    pub course_dir: String,
    pub output_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "https://saitamau-maximum.github.io/cms".to_string(),
            asset_prefix: "/public".to_string(),
            course_dir: "course".to_string(),
            output_dir: "dist/course".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Check values that the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        if !is_absolute_http_url(&self.origin) {
            bail!("origin must be an absolute http(s) URL, got {:?}", self.origin);
        }
        if !self.asset_prefix.starts_with('/') {
            bail!("asset_prefix must start with '/', got {:?}", self.asset_prefix);
        }
        Ok(())
    }
}
