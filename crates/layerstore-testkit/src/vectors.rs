//! Golden test vectors for the stock codecs.
//!
//! Each vector pins the exact bytes the JSON and CBOR codecs produce for a
//! document, so stored data stays readable across releases.

use serde_json::Value;

use layerstore_core::Reference;
use layerstore_mapping::{CborCodec, Codec, JsonCodec};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The document, as compact JSON with sorted keys.
    pub json: &'static str,
    /// Expected CBOR encoding (hex).
    pub cbor_hex: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "null",
            json: "null",
            cbor_hex: "f6",
        },
        GoldenVector {
            name: "boolean",
            json: "true",
            cbor_hex: "f5",
        },
        GoldenVector {
            name: "greeting",
            json: r#""Hello world!""#,
            cbor_hex: "6c48656c6c6f20776f726c6421",
        },
        GoldenVector {
            name: "negative integer",
            json: "-1",
            cbor_hex: "20",
        },
        GoldenVector {
            name: "two-byte integer",
            json: "500",
            cbor_hex: "1901f4",
        },
        GoldenVector {
            name: "array",
            json: "[1,2,3]",
            cbor_hex: "83010203",
        },
        GoldenVector {
            name: "single field object",
            json: r#"{"a":1}"#,
            cbor_hex: "a1616101",
        },
        GoldenVector {
            name: "nested object",
            json: r#"{"name":"ada","tags":["x"]}"#,
            cbor_hex: "a2646e616d65636164616474616773816178",
        },
    ]
}

/// Check one vector against both codecs.
pub fn verify_vector(vector: &GoldenVector) -> Result<(), String> {
    let reference = Reference::new("golden", vector.name);
    let document: Value = serde_json::from_str(vector.json)
        .map_err(|e| format!("{}: vector is not JSON: {e}", vector.name))?;

    let text: String = JsonCodec::default()
        .encode(&document, &reference)
        .map_err(|e| format!("{}: {e}", vector.name))?;
    if text != vector.json {
        return Err(format!(
            "{}: JSON encoding {text} != {}",
            vector.name, vector.json
        ));
    }

    let expected = expected_cbor(vector)?;
    let bytes = Codec::<Value>::encode(&CborCodec, &document, &reference)
        .map_err(|e| format!("{}: {e}", vector.name))?;
    if bytes != expected {
        return Err(format!(
            "{}: CBOR encoding {} != {}",
            vector.name,
            hex::encode(&bytes),
            hex::encode(&expected)
        ));
    }

    let decoded: Value = CborCodec
        .decode(bytes, &reference)
        .map_err(|e| format!("{}: {e}", vector.name))?;
    if decoded != document {
        return Err(format!("{}: CBOR decode changed the document", vector.name));
    }
    Ok(())
}

/// Verify all golden vectors, returning `(name, outcome)` per vector.
pub fn verify_all_vectors() -> Vec<(String, Result<(), String>)> {
    all_vectors()
        .iter()
        .map(|v| (v.name.to_string(), verify_vector(v)))
        .collect()
}

fn expected_cbor(vector: &GoldenVector) -> Result<Vec<u8>, String> {
    let compact: String = vector.cbor_hex.split_whitespace().collect();
    hex::decode(compact).map_err(|e| format!("{}: bad hex: {e}", vector.name))
}
