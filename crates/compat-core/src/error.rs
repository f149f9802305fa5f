//! Errors raised while migrating an application

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a migration
#[derive(Error, Debug)]
pub enum CompatError {
    #[error("Failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(
        "Found {} {server} configuration files under `.bp-config/{folder}`. Customizing {server} configuration in this manner is no longer supported. Please migrate your configuration, see the Migration guide for more details.",
        files.len()
    )]
    UnsupportedCustomConfig {
        server: String,
        folder: String,
        files: Vec<PathBuf>,
    },

    #[error("{0}")]
    ConflictingConfig(String),

    #[error("File system error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration: {source}")]
    ConfigSerialize { source: serde_yaml::Error },

    #[error("Failed to parse {}: {source}", path.display())]
    BuildpackYmlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid WEBDIR `{web_dir}`: {reason}")]
    InvalidWebDir { web_dir: String, reason: &'static str },

    #[error("Invalid snippet pattern: {0}")]
    SnippetPattern(#[from] regex::Error),

    #[error("Failed to read build plan {}: {source}", path.display())]
    PlanRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse build plan {}: {source}", path.display())]
    PlanParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl CompatError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompatError::FileSystem {
            path: path.into(),
            source,
        }
    }
}
