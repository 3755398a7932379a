//! Pipeline error types

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;
use token_core::TokenError;
use token_emit::EmitError;
use token_output::OutputError;

/// Errors raised by a build, either for the whole build or for one pair
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Token parsing, validation or resolution error
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Target selection or emission error
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// Output error
    #[error(transparent)]
    Output(#[from] OutputError),

    /// The token source could not be read
    #[error("Failed to read token source {path}: {source}")]
    Source {
        /// Source path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A build task panicked or was cancelled
    #[error("Build task failed: {0}")]
    Task(String),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
