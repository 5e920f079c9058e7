use std::path::Path;

use thiserror::Error;

/// Error types for the showcue application.
///
/// This enum represents all possible errors that can occur during
/// configuration loading, parsing, and validation.
#[derive(Error, Debug)]
pub enum ShowcueError {
    /// Configuration validation error
    #[error("configuration validation failed for '{field}': {reason}")]
    ConfigValidation {
        /// The field that failed validation
        field: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },
}

/// A specialized `Result` type for showcue operations.
///
/// This type alias simplifies error handling by defaulting the error type
/// to `ShowcueError` for all showcue operations.
pub type Result<T> = std::result::Result<T, ShowcueError>;

impl ShowcueError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ShowcueError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates a validation error for a named configuration field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ShowcueError::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
