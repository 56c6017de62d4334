//! Error types for isoview-core

use thiserror::Error;

/// Main error type for scene graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Index {index} out of range for group of {len} nodes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type alias for scene graph operations
pub type Result<T> = std::result::Result<T, Error>;
