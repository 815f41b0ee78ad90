//! Storage error types

use std::path::Path;
use thiserror::Error;

/// Storage-related errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// The persistent medium cannot be opened, read or written
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A value could not be encoded for the medium
    #[error("Failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: &Path, action: &str, err: std::io::Error) -> Self {
        StorageError::Unavailable(format!("{action} {}: {err}", path.display()))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_))
    }
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
