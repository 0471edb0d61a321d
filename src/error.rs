//! Errors raised by the content pipeline
//!
//! Every failure is fatal to a run. Variants that originate from a specific
//! file carry its path so the entry point can point the author at it.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Pipeline error
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("I/O error: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Front-matter not found")]
    FrontmatterMissing { path: PathBuf },

    #[error("Front-matter is not valid YAML: {reason}")]
    FrontmatterMalformed { path: PathBuf, reason: String },

    #[error("Front-matter is invalid: {reason}")]
    FrontmatterInvalid { path: PathBuf, reason: String },

    #[error("Content is empty")]
    ContentEmpty { path: PathBuf },

    #[error("Failed to serialize JSON: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BuildError>;

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn frontmatter_missing(path: impl Into<PathBuf>) -> Self {
        Self::FrontmatterMissing { path: path.into() }
    }

    pub fn frontmatter_malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FrontmatterMalformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn frontmatter_invalid(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FrontmatterInvalid {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn content_empty(path: impl Into<PathBuf>) -> Self {
        Self::ContentEmpty { path: path.into() }
    }

    pub fn serialize(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serialize {
            path: path.into(),
            source,
        }
    }

    /// The file this error is about, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. }
            | Self::FrontmatterMissing { path }
            | Self::FrontmatterMalformed { path, .. }
            | Self::FrontmatterInvalid { path, .. }
            | Self::ContentEmpty { path }
            | Self::Serialize { path, .. } => Some(path),
            Self::Task(_) => None,
        }
    }
}
