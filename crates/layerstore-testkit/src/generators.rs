//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Value};

use layerstore_core::{OperationKind, Reference};

/// Generate a scheme name.
pub fn scheme() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}".prop_map(String::from)
}

/// Generate one path component that no store rejects.
pub fn path_component() -> impl Strategy<Value = String> {
    "[a-z0-9_-][a-z0-9_.-]{0,7}".prop_map(String::from)
}

/// Generate a relative path of one to four components.
pub fn path() -> impl Strategy<Value = String> {
    prop::collection::vec(path_component(), 1..=4).prop_map(|parts| parts.join("/"))
}

/// Generate a reference valid for every leaf store, including files.
pub fn reference() -> impl Strategy<Value = Reference> {
    (scheme(), path()).prop_map(|(scheme, path)| Reference::new(scheme, path))
}

/// Generate an arbitrary JSON document.
///
/// Numbers mix integers with finite floats; JSON cannot carry NaN or infinities.
pub fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|fields| Value::Object(fields.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Generate payload bytes of at most `max_len`.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate an operation kind.
pub fn operation_kind() -> impl Strategy<Value = OperationKind> {
    prop_oneof![
        Just(OperationKind::Get),
        Just(OperationKind::Put),
        Just(OperationKind::Merge),
        Just(OperationKind::Delete),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerstore_core::Storage;
    use layerstore_store::FileStore;

    proptest! {
        #[test]
        fn test_references_are_valid_file_paths(r in reference()) {
            let files = FileStore::new("/tmp/layerstore-gen");
            prop_assert!(files.path_for(&r).is_ok());
        }

        #[test]
        fn test_components_never_escape(c in path_component()) {
            prop_assert!(c != "." && c != "..");
            prop_assert!(!c.contains('/'));
        }

        #[test]
        fn test_json_values_round_trip_text(v in json_value()) {
            let text = serde_json::to_string(&v).unwrap();
            let back: Value = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(back, v);
        }

        #[test]
        fn test_payload_respects_bound(p in payload(16)) {
            prop_assert!(p.len() <= 16);
        }
    }

    #[test]
    fn test_generated_reference_usable_in_memory_store() {
        use proptest::strategy::ValueTree;
        use proptest::test_runner::TestRunner;

        let mut runner = TestRunner::deterministic();
        let r = reference().new_tree(&mut runner).unwrap().current();

        let store = layerstore_store::MemoryStore::new();
        store.put(&r, &"v".to_string()).unwrap();
        assert_eq!(store.get(&r).unwrap(), "v");
    }
}
