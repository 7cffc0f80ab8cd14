//! Error types for stack construction.

use layerstore_core::StorageError;
use layerstore_store::StoreError;
use thiserror::Error;

/// Errors that can occur while configuring or building a stack.
#[derive(Debug, Error)]
pub enum LayerError {
    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backend could not be opened.
    #[error("backend error: {0}")]
    Backend(#[from] StoreError),

    /// Configuration is malformed or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is not valid JSON.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for stack construction.
pub type Result<T> = std::result::Result<T, LayerError>;
