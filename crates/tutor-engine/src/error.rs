//! Error types for the fraction tutor engine.
//!
//! The tutor core has no fatal conditions at runtime: wrong learner input is
//! feedback, a bad deep link falls back to generation, a silent content
//! provider falls back to the local catalog. The errors below cover the one
//! fallible startup path (configuration loading) plus I/O and JSON wrappers.

use std::path::PathBuf;

/// A specialized `Result` type for tutor engine operations.
pub type Result<T> = std::result::Result<T, TutorError>;

/// Errors that can occur while setting up the tutor.
///
/// Error variants include actionable suggestions where possible to help
/// users resolve issues.
#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    /// Invalid JSON syntax in the configuration file.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your tutor.json with a JSON linter")]
    ConfigParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    /// General I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TutorError {
    /// Creates a new `ConfigParseError` with the given path and message.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}
