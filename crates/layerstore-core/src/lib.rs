//! # Layerstore Core
//!
//! Pure primitives for layerstore: the addressing model, the operation
//! record, and the storage contract every store must honor.
//!
//! This crate contains no I/O. Leaf stores live in `layerstore-store`,
//! combinators in `layerstore-combinators` and `layerstore-mapping`.
//!
//! ## Key Types
//!
//! - [`Reference`] - Immutable `(scheme, path)` address of an entity
//! - [`Storage`] - The four-operation contract: get, put, merge, delete_at
//! - [`Operation`] - Borrowed record of an attempted access, used for auditing
//! - [`Merge`] - Entity-specific combination logic used by `merge`
//! - [`StorageError`] - The error taxonomy shared by every store
//!
//! ## Composition
//!
//! Stores are composed by wrapping: a combinator owns its inner stores as
//! [`DynStorage`] handles and delegates to them synchronously. Any
//! `Arc<S>` is itself a store, so a leaf can be shared with a combinator
//! while the application keeps a handle for inspection.

pub mod error;
pub mod merge;
pub mod operation;
pub mod reference;
pub mod storage;

pub use error::{Result, StorageError};
pub use merge::Merge;
pub use operation::{Operation, OperationKind, OperationRecord};
pub use reference::Reference;
pub use storage::{DynStorage, Storage, StorageExt};
