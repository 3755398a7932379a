//! Token error types

use thiserror::Error;

/// Errors raised while parsing, validating or resolving tokens
#[derive(Debug, Error)]
pub enum TokenError {
    /// The authoring document is not valid JSON or has the wrong shape
    #[error("Failed to parse token source: {0}")]
    Parse(#[from] serde_json::Error),

    /// A token is malformed
    #[error("Invalid token '{token}': {message}")]
    Validation {
        /// Offending token name
        token: String,
        /// What is wrong with it
        message: String,
    },

    /// Two tokens in one set share a name
    #[error("Duplicate token name: {name}")]
    DuplicateName {
        /// The duplicated name
        name: String,
    },

    /// Lookup of a name that is not in the registry
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// An alias points at a name that does not exist
    #[error("Token '{token}' references unknown token '{target}'")]
    UnresolvedAlias {
        /// Token holding the alias
        token: String,
        /// Missing alias target
        target: String,
    },

    /// Alias resolution revisited a name already on the resolution path
    #[error("Circular alias detected: {}", cycle.join(" -> "))]
    CyclicAlias {
        /// Resolution path, ending with the revisited name
        cycle: Vec<String>,
    },

    /// A theme overrides a name absent from the base set
    #[error("Theme '{theme}' overrides unknown token '{name}'")]
    UnknownOverride {
        /// Theme id
        theme: String,
        /// Override name
        name: String,
    },

    /// Set selection configuration cannot be satisfied
    #[error("Invalid set selection: {0}")]
    Selection(String),
}

impl TokenError {
    pub(crate) fn validation(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            token: token.into(),
            message: message.into(),
        }
    }
}

/// Result type for token operations
pub type Result<T> = std::result::Result<T, TokenError>;
