//! CBOR binary codec.

use serde::de::DeserializeOwned;
use serde::Serialize;

use layerstore_core::Reference;

use crate::codec::Codec;
use crate::error::{CodecError, Result};

/// Serializes any serde value to CBOR bytes.
///
/// The binary counterpart of [`JsonCodec`](crate::JsonCodec), suited to
/// byte stores such as files and SQLite.
#[derive(Debug, Clone, Copy, Default)]
pub struct CborCodec;

impl<T: Serialize + DeserializeOwned> Codec<T> for CborCodec {
    type Encoded = Vec<u8>;

    fn encode(&self, entity: &T, _reference: &Reference) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(entity, &mut buf).map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(buf)
    }

    fn decode(&self, encoded: Vec<u8>, _reference: &Reference) -> Result<T> {
        ciborium::from_reader(encoded.as_slice()).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Reading {
        sensor: String,
        values: Vec<f64>,
        meta: BTreeMap<String, i32>,
    }

    fn r() -> Reference {
        Reference::new("cbor", "reading")
    }

    #[test]
    fn test_cbor_roundtrip_struct() {
        let reading = Reading {
            sensor: "t-1".into(),
            values: vec![20.5, 21.0],
            meta: BTreeMap::from([("floor".to_string(), 3)]),
        };

        let bytes = CborCodec.encode(&reading, &r()).unwrap();
        let back: Reading = CborCodec.decode(bytes, &r()).unwrap();
        assert_eq!(back, reading);
    }

    #[test]
    fn test_cbor_known_encoding() {
        // map(1) { "a": 1 }
        let bytes = CborCodec
            .encode(&BTreeMap::from([("a".to_string(), 1u8)]), &r())
            .unwrap();
        assert_eq!(bytes, vec![0xa1, 0x61, b'a', 0x01]);
    }

    #[test]
    fn test_cbor_truncated_fails_to_decode() {
        let bytes = CborCodec.encode(&String::from("a longer string"), &r()).unwrap();
        let truncated = bytes[..bytes.len() - 3].to_vec();

        let result: Result<String> = CborCodec.decode(truncated, &r());
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    proptest! {
        #[test]
        fn test_cbor_decode_inverts_encode(
            sensor in "[ -~]{0,24}",
            values in prop::collection::vec(-1.0e9f64..1.0e9, 0..8),
            meta in prop::collection::btree_map("[a-z]{1,6}", any::<i32>(), 0..4),
        ) {
            let reading = Reading { sensor, values, meta };
            let bytes = CborCodec.encode(&reading, &r()).unwrap();
            let back: Reading = CborCodec.decode(bytes, &r()).unwrap();
            prop_assert_eq!(back, reading);
        }
    }
}
