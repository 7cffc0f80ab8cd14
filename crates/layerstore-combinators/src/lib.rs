//! # Layerstore Combinators
//!
//! Stores that wrap other stores and add one orthogonal behavior each.
//!
//! ## Key Types
//!
//! - [`CacheStore`] - Read-through, write-through caching over a primary
//! - [`LoggingStore`] - Hands every operation to a [`Filter`] before delegating
//! - [`TracingFilter`], [`RecordingFilter`], [`ReadOnlyFilter`], [`FnFilter`] - Stock filters
//! - [`SwitchStore`] - Routes each call to a store chosen from the reference
//! - [`PassThrough`] - The identity combinator
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use layerstore_core::{Reference, Storage};
//! use layerstore_combinators::CacheStore;
//! use layerstore_store::MemoryStore;
//!
//! let db = Arc::new(MemoryStore::new());
//! let redis_cache = Arc::new(MemoryStore::new());
//! let in_memory = Arc::new(MemoryStore::new());
//!
//! // Two levels of caching.
//! let top = CacheStore::new(CacheStore::new(db.clone(), redis_cache.clone()), in_memory.clone());
//!
//! let r = Reference::new("dict", "greeting");
//! top.put(&r, &String::from("Hello world!")).unwrap();
//! assert_eq!(db.get(&r).unwrap(), "Hello world!");
//! assert_eq!(in_memory.get(&r).unwrap(), "Hello world!");
//! ```
//!
//! ## Design Notes
//!
//! - **Primary first**: every write reaches the authoritative store before
//!   any cache, so a failure in between leaves a cold cache, not a lie.
//! - **Filters can veto**: a filter error stops the call before the inner
//!   store is touched.
//! - **No swallowed errors**: the cache's miss fall-through is the only
//!   place an inner error does not propagate.

pub mod cache;
pub mod filter;
pub mod logging;
pub mod passthrough;
pub mod switch;

pub use cache::CacheStore;
pub use filter::{FnFilter, ReadOnlyFilter, RecordingFilter, TracingFilter};
pub use logging::{Filter, LoggingStore};
pub use passthrough::PassThrough;
pub use switch::{RouteKey, SwitchStore};
