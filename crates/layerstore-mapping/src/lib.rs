//! # Layerstore Mapping
//!
//! The mapping family of combinators: stores that wrap exactly one inner
//! store and transform either the entity or the reference on the way in,
//! and inversely on the way out.
//!
//! ## Key Types
//!
//! - [`Codec`] / [`CodecStore`] - Entity translation (serialization, sealing)
//! - [`AddressMap`] / [`AddressStore`] - Reference translation
//! - [`JsonCodec`], [`CborCodec`], [`Utf8Codec`], [`SealedCodec`] - Stock codecs
//! - [`RootedPaths`], [`SchemePrefix`] - Stock address maps
//!
//! ## Usage
//!
//! ```rust,no_run
//! use layerstore_core::{Reference, Storage};
//! use layerstore_mapping::{AddressStore, CodecStore, JsonCodec, RootedPaths, Utf8Codec};
//! use layerstore_store::FileStore;
//! use serde_json::{json, Value};
//!
//! // JSON text -> UTF-8 bytes -> files under /var/lib/app/docs
//! let files = FileStore::new("/var/lib/app");
//! let rooted = AddressStore::new(RootedPaths::new("docs"), files);
//! let bytes = CodecStore::new(Utf8Codec, rooted);
//! let docs: CodecStore<Value, _> = CodecStore::new(JsonCodec::default(), bytes);
//!
//! docs.put(&Reference::new("doc", "user/1.json"), &json!({"name": "ada"})).unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Two-sided codecs**: `decode(encode(x)) == x` for every representable
//!   `x`; a decode failure is `CorruptData`, never `NotFound`.
//! - **Injectivity is the caller's job**: an address map that sends two
//!   logical references to one location aliases them silently.

pub mod address;
pub mod cbor;
pub mod codec;
pub mod error;
pub mod json;
pub mod sealed;
pub mod text;

pub use address::{AddressMap, AddressStore, RootedPaths, SchemePrefix};
pub use cbor::CborCodec;
pub use codec::{Codec, CodecStore};
pub use error::{CodecError, Result};
pub use json::JsonCodec;
pub use sealed::{SealedCodec, SealingKey};
pub use text::Utf8Codec;
