//! Error types for model loading

use thiserror::Error;

/// Errors that can occur while loading a model file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported file format: {extension:?}")]
    UnsupportedFormat { extension: Option<String> },

    #[error("{format} parse error: {message}")]
    Parse { format: String, message: String },

    #[error("Invalid {format} file: {message}")]
    InvalidFormat { format: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub(crate) fn parse(format: &str, message: impl Into<String>) -> Self {
        LoadError::Parse {
            format: format.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid(format: &str, message: impl Into<String>) -> Self {
        LoadError::InvalidFormat {
            format: format.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for loading operations
pub type Result<T> = std::result::Result<T, LoadError>;
