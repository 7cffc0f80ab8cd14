//! Error types for codecs.

use thiserror::Error;

/// Errors raised by a [`Codec`](crate::Codec).
///
/// [`CodecStore`](crate::CodecStore) converts these into storage errors:
/// `Encode` becomes `StorageError::Encode`, `Decode` becomes
/// `StorageError::CorruptData`.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The entity has no representation in the stored form.
    #[error("encoding error: {0}")]
    Encode(String),

    /// The stored form does not reconstruct an entity.
    #[error("decoding error: {0}")]
    Decode(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
