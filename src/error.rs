//! Top-level error types for the command line front end.
//!
//! Core failures live in [`crate::signer::error`]; this module wraps them with
//! the IO and serialization failures of the CLI layer. Usage errors never reach
//! this type: clap reports them and exits with status 2.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, SignapkError>;

/// Main error type surfaced by the binary
#[derive(Error, Debug)]
pub enum SignapkError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pipeline errors
    #[error("{0}")]
    Signer(#[from] crate::signer::Error),
}

impl From<crate::signer::ConfigError> for SignapkError {
    fn from(error: crate::signer::ConfigError) -> Self {
        SignapkError::Signer(error.into())
    }
}

