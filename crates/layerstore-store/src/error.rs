//! Error types for the leaf backends.

use layerstore_core::StorageError;
use thiserror::Error;

/// Errors raised while opening or talking to a physical medium.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every backend failure surfaces through the storage contract as
/// `BackendUnavailable`.
impl From<StoreError> for StorageError {
    fn from(e: StoreError) -> Self {
        StorageError::BackendUnavailable(e.to_string())
    }
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, StoreError>;
