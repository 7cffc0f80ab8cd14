//! # Layerstore Testkit
//!
//! Testing utilities for layerstore.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed JSON and CBOR encodings that codecs must reproduce byte for byte
//! - **Generators**: Proptest strategies for references, JSON documents and payloads
//! - **Fixtures**: Prebuilt stacks and temporary file roots
//!
//! ## Golden Vectors
//!
//! ```rust
//! use layerstore_testkit::vectors::{all_vectors, verify_vector};
//!
//! for vector in all_vectors() {
//!     verify_vector(&vector).unwrap();
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use layerstore_testkit::generators::{json_value, reference};
//!
//! proptest! {
//!     #[test]
//!     fn put_then_get(r in reference(), v in json_value()) {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use layerstore_core::{Reference, Storage};
//! use layerstore_testkit::fixtures::CacheFixture;
//!
//! let fixture = CacheFixture::<String>::new();
//! let r = Reference::new("dict", "greeting");
//! fixture.top.put(&r, &"hi".to_string()).unwrap();
//! assert_eq!(fixture.db.get(&r).unwrap(), "hi");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{CacheFixture, TempFiles, Unreachable};
pub use generators::{json_value, operation_kind, payload, reference};
pub use vectors::{all_vectors, verify_all_vectors, verify_vector, GoldenVector};
