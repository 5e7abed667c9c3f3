//! Error types for the ERP workspace.

use groundwork_runtime::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading seed data
#[derive(Error, Debug)]
pub enum SeedError {
    /// The seed file could not be read
    #[error("Failed to read seed file {}", .path.display())]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The seed document is not valid JSON of the expected shape
    #[error("Invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds an unusable value
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Top-level error for workspace operations
#[derive(Error, Debug)]
pub enum ErpError {
    /// Seed loading failed
    #[error(transparent)]
    Seed(#[from] SeedError),

    /// Configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A store rejected an action
    #[error(transparent)]
    Store(#[from] StoreError),
}
