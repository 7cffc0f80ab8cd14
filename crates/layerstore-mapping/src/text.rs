//! UTF-8 text over bytes.

use layerstore_core::Reference;

use crate::codec::Codec;
use crate::error::{CodecError, Result};

/// Stores text as UTF-8 bytes; invalid UTF-8 fails to decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec;

impl Codec<String> for Utf8Codec {
    type Encoded = Vec<u8>;

    fn encode(&self, entity: &String, _reference: &Reference) -> Result<Vec<u8>> {
        Ok(entity.as_bytes().to_vec())
    }

    fn decode(&self, encoded: Vec<u8>, _reference: &Reference) -> Result<String> {
        String::from_utf8(encoded).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
