//! Error types for devkit-codegen

use thiserror::Error;

/// Result type alias for devkit-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during conversion
///
/// Malformed column/field lines and unmapped types are not errors: the line
/// is dropped or the language fallback type is used, and a `debug!` event is
/// logged instead.
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}
