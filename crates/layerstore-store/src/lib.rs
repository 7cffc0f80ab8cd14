//! # Layerstore Store
//!
//! Leaf stores: stores with no inner stores, backed directly by a medium.
//!
//! ## Key Types
//!
//! - [`MemoryStore`] - Reference-keyed in-memory map, generic over the entity
//! - [`FileStore`] - Raw bytes, one file per reference under a root directory
//! - [`TextFileStore`] - UTF-8 text over the same file layout
//! - [`SqliteStore`] - Raw bytes in a single SQLite table
//!
//! ## Usage
//!
//! ```rust,no_run
//! use layerstore_core::{Reference, Storage};
//! use layerstore_store::{FileStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let greeting = Reference::new("dict", "greeting");
//! store.put(&greeting, &String::from("Hello World!")).unwrap();
//! assert_eq!(store.get(&greeting).unwrap(), "Hello World!");
//!
//! let files = FileStore::open("/var/lib/app").unwrap();
//! files.put(&Reference::new("files", "notes/today.txt"), &b"hi".to_vec()).unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Atomic file writes**: content is written to a temporary file in the
//!   target directory and renamed over the target.
//! - **Explicit root**: file stores never consult the process working directory.
//! - **Idempotent deletes**: removing a missing entity succeeds in every leaf.

pub mod error;
pub mod file;
pub mod memory;
pub mod migration;
pub mod sqlite;

pub use error::{Result, StoreError};
pub use file::{FileStore, TextFileStore};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
