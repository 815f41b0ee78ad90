//! Theme error types

use recall_storage::StorageError;
use thiserror::Error;

/// Theme-related errors
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A theme name outside the known set was requested
    #[error("Unknown theme `{0}` (expected `light` or `dark`)")]
    InvalidTheme(String),

    /// The persisted value does not decode to a known theme
    #[error("Persisted theme value not recognized: {0}")]
    InvalidPersistedValue(String),

    /// The durable store failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A process-wide theme store was already installed
    #[error("Theme store already installed")]
    AlreadyInstalled,
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
