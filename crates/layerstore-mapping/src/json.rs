//! JSON text codec.

use serde::de::DeserializeOwned;
use serde::Serialize;

use layerstore_core::Reference;

use crate::codec::Codec;
use crate::error::{CodecError, Result};

/// Serializes any serde value to JSON text.
///
/// Encoding refuses values whose text would not decode back into `T`,
/// such as non-finite floats, which serde_json writes as `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Emit indented JSON instead of the compact form.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl<T: Serialize + DeserializeOwned> Codec<T> for JsonCodec {
    type Encoded = String;

    fn encode(&self, entity: &T, _reference: &Reference) -> Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(entity)
        } else {
            serde_json::to_string(entity)
        };
        let text = text.map_err(|e| CodecError::Encode(e.to_string()))?;
        serde_json::from_str::<T>(&text)
            .map_err(|e| CodecError::Encode(format!("encoded text does not decode: {e}")))?;
        Ok(text)
    }

    fn decode(&self, encoded: String, _reference: &Reference) -> Result<T> {
        serde_json::from_str(&encoded).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
