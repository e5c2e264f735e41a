//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Log filter must not be empty")]
    EmptyLogLevel,

    #[error("Invalid filename component {0}: use letters, digits, '-' or '_'")]
    InvalidFilenameComponent(&'static str),

    #[error("Export output directory must not be empty")]
    EmptyOutputDir,

    #[error("Invalid PDF timeout (must be 1-300 seconds)")]
    InvalidTimeout,

    #[error("Pandoc path must not be blank when set")]
    BlankPandocPath,
}
