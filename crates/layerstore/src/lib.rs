//! # Layerstore
//!
//! Composable storage: one small contract (get, put, merge, delete_at) over
//! an addressable entity, with caching, serialization, address mapping and
//! auditing expressed as stores that wrap other stores.
//!
//! ## Overview
//!
//! - **Reference**: immutable `(scheme, path)` address, the key in every store
//! - **Leaf stores**: memory, files, SQLite
//! - **Combinators**: cache, codec, address mapping, logging/filtering, routing
//!
//! Control flow is top-down delegation: a call on the outermost store
//! transforms or duplicates it and calls inner stores, synchronously,
//! until it reaches the leaves.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use layerstore::core::{Reference, Storage};
//! use layerstore::combinators::CacheStore;
//! use layerstore::store::MemoryStore;
//!
//! let db = Arc::new(MemoryStore::new());
//! let redis_cache = Arc::new(MemoryStore::new());
//! let in_memory = Arc::new(MemoryStore::new());
//! let top = CacheStore::new(CacheStore::new(db.clone(), redis_cache.clone()), in_memory.clone());
//!
//! let r = Reference::new("dict", "greeting");
//! top.put(&r, &String::from("Hello world!")).unwrap();
//! assert_eq!(redis_cache.get(&r).unwrap(), "Hello world!");
//!
//! top.delete_at(&r).unwrap();
//! assert!(db.get(&r).unwrap_err().is_not_found());
//! ```
//!
//! Stacks can also be described declaratively, see [`StackConfig`] and
//! [`build_stack`].
//!
//! ## Re-exports
//!
//! - `layerstore::core` - Reference, Storage, Operation, errors
//! - `layerstore::store` - Leaf stores
//! - `layerstore::mapping` - Codec and address-mapping stores
//! - `layerstore::combinators` - Cache, logging, routing

pub mod config;
pub mod error;
pub mod stack;

// Re-export component crates
pub use layerstore_combinators as combinators;
pub use layerstore_core as core;
pub use layerstore_mapping as mapping;
pub use layerstore_store as store;

pub use config::{AuditConfig, BackendConfig, StackConfig};
pub use error::{LayerError, Result};
pub use stack::{build_document_stack, build_stack};

// Re-export commonly used types
pub use layerstore_combinators::{CacheStore, Filter, LoggingStore};
pub use layerstore_core::{
    DynStorage, Merge, Operation, OperationKind, OperationRecord, Reference, Storage,
    StorageError, StorageExt,
};
pub use layerstore_mapping::{AddressStore, CodecStore};
pub use layerstore_store::{FileStore, MemoryStore, SqliteStore, TextFileStore};
