//! Entity translation: the codec trait and the store that applies it.

use std::marker::PhantomData;

use layerstore_core::{DynStorage, Reference, Storage, StorageError};

use crate::error::{CodecError, Result};

/// A two-sided transformation between an entity and its stored form.
///
/// The reference is passed through so a codec can bind the encoding to
/// the address it is stored under.
pub trait Codec<T>: Send + Sync {
    /// The storable form handed to the inner store.
    type Encoded;

    fn encode(&self, entity: &T, reference: &Reference) -> Result<Self::Encoded>;

    fn decode(&self, encoded: Self::Encoded, reference: &Reference) -> Result<T>;
}

/// Store that encodes entities on the way in and decodes on the way out.
///
/// `put` and `merge` encode and delegate the encoded form, so merge
/// semantics are those of the inner store's stored form. `delete_at`
/// passes straight through.
pub struct CodecStore<T, C: Codec<T>> {
    codec: C,
    inner: DynStorage<C::Encoded>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, C: Codec<T>> CodecStore<T, C> {
    pub fn new(codec: C, inner: impl Storage<C::Encoded> + 'static) -> Self {
        Self {
            codec,
            inner: Box::new(inner),
            _entity: PhantomData,
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// The wrapped store, seen in its encoded form.
    pub fn inner(&self) -> &dyn Storage<C::Encoded> {
        self.inner.as_ref()
    }

    fn encode(&self, entity: &T, reference: &Reference) -> layerstore_core::Result<C::Encoded> {
        self.codec
            .encode(entity, reference)
            .map_err(|e| StorageError::Encode {
                reference: reference.clone(),
                reason: e.to_string(),
            })
    }
}

impl<T, C: Codec<T>> Storage<T> for CodecStore<T, C> {
    fn get(&self, reference: &Reference) -> layerstore_core::Result<T> {
        let encoded = self.inner.get(reference)?;
        self.codec.decode(encoded, reference).map_err(|e| {
            tracing::warn!(%reference, error = %e, "stored entity failed to decode");
            StorageError::corrupt(reference, e)
        })
    }

    fn put(&self, reference: &Reference, entity: &T) -> layerstore_core::Result<()> {
        let encoded = self.encode(entity, reference)?;
        self.inner.put(reference, &encoded)
    }

    fn merge(&self, reference: &Reference, entity: &T) -> layerstore_core::Result<()> {
        let encoded = self.encode(entity, reference)?;
        self.inner.merge(reference, &encoded)
    }

    fn delete_at(&self, reference: &Reference) -> layerstore_core::Result<()> {
        self.inner.delete_at(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerstore_store::MemoryStore;
    use std::sync::Arc;

    /// Stores integers as decimal text.
    struct Decimal;

    impl Codec<i64> for Decimal {
        type Encoded = String;

        fn encode(&self, entity: &i64, _reference: &Reference) -> Result<String> {
            Ok(entity.to_string())
        }

        fn decode(&self, encoded: String, _reference: &Reference) -> Result<i64> {
            encoded
                .parse()
                .map_err(|e: std::num::ParseIntError| CodecError::Decode(e.to_string()))
        }
    }

    fn decimal_store() -> (Arc<MemoryStore<String>>, CodecStore<i64, Decimal>) {
        let leaf = Arc::new(MemoryStore::new());
        (leaf.clone(), CodecStore::new(Decimal, leaf))
    }

    #[test]
    fn test_put_stores_encoded_form() {
        let (leaf, store) = decimal_store();
        let r = Reference::new("n", "answer");

        store.put(&r, &42).unwrap();
        assert_eq!(leaf.get(&r).unwrap(), "42");
        assert_eq!(store.get(&r).unwrap(), 42);
    }

    #[test]
    fn test_undecodable_is_corrupt_not_missing() {
        let (leaf, store) = decimal_store();
        let r = Reference::new("n", "garbage");

        leaf.put(&r, &String::from("forty-two")).unwrap();
        let err = store.get(&r).unwrap_err();
        assert!(matches!(err, StorageError::CorruptData { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_missing_passes_through() {
        let (_leaf, store) = decimal_store();
        assert!(store.get(&Reference::new("n", "none")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_merge_and_delete_delegate() {
        let (leaf, store) = decimal_store();
        let r = Reference::new("n", "m");

        store.merge(&r, &7).unwrap();
        assert_eq!(leaf.get(&r).unwrap(), "7");

        store.delete_at(&r).unwrap();
        store.delete_at(&r).unwrap();
        assert!(leaf.is_empty());
    }
}
