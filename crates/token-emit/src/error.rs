//! Emitter error types

use thiserror::Error;

/// Errors raised while selecting targets or emitting artifacts
#[derive(Debug, Error)]
pub enum EmitError {
    /// A token name is not a valid identifier in the target language
    #[error("Token name '{name}' is not a valid identifier for target '{target}'")]
    InvalidIdentifier {
        /// Name as it would appear in the artifact
        name: String,
        /// Target format
        target: String,
    },

    /// A value cannot be written safely into the target syntax
    #[error("Token '{name}' has a value that cannot be emitted for target '{target}': {message}")]
    InvalidValue {
        /// Token name
        name: String,
        /// Target format
        target: String,
        /// What is wrong with the value
        message: String,
    },

    /// Configuration names a platform the catalog does not know
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// Two targets were registered under one id
    #[error("Target already registered: {0}")]
    DuplicateTarget(String),

    /// JSON output could not be serialized
    #[error("Failed to serialize JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl EmitError {
    pub(crate) fn invalid_identifier(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            name: name.into(),
            target: target.into(),
        }
    }
}

impl EmitError {
    pub(crate) fn invalid_value(
        name: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            name: name.into(),
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Result type for emitter operations
pub type Result<T> = std::result::Result<T, EmitError>;
