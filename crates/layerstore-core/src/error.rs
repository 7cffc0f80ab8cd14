//! Error types shared by every store.

use thiserror::Error;

use crate::operation::OperationKind;
use crate::reference::Reference;

/// Errors that can occur during storage operations.
///
/// Combinators pass these through unchanged. The only fallback in the
/// system is the cache falling through to its primary on [`NotFound`].
///
/// [`NotFound`]: StorageError::NotFound
#[derive(Debug, Error)]
pub enum StorageError {
    /// No entity is stored at the reference.
    #[error("not found: {0}")]
    NotFound(Reference),

    /// An entity exists but could not be reconstructed.
    #[error("corrupt data at {reference}: {reason}")]
    CorruptData { reference: Reference, reason: String },

    /// An entity could not be converted to its storable form.
    #[error("cannot encode entity for {reference}: {reason}")]
    Encode { reference: Reference, reason: String },

    /// The physical medium could not be reached.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The reference cannot be expressed by this store.
    #[error("invalid reference {reference}: {reason}")]
    InvalidReference { reference: Reference, reason: String },

    /// A filter vetoed the operation.
    #[error("{kind} on {reference} rejected: {reason}")]
    Rejected {
        kind: OperationKind,
        reference: Reference,
        reason: String,
    },

    /// No store is registered for the routing key.
    #[error("no route for key {key:?} ({reference})")]
    NoRoute { key: String, reference: Reference },
}

impl StorageError {
    /// Build a [`StorageError::CorruptData`].
    pub fn corrupt(reference: &Reference, reason: impl ToString) -> Self {
        Self::CorruptData {
            reference: reference.clone(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`StorageError::BackendUnavailable`].
    pub fn unavailable(reason: impl ToString) -> Self {
        Self::BackendUnavailable(reason.to_string())
    }

    /// Whether this is the expected "nothing stored here" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
