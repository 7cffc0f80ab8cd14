//! In-memory implementation of the Storage trait.
//!
//! The simplest leaf: a map from reference to entity. It owns a copy of
//! every stored entity for its own lifetime. Thread-safe via RwLock.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use layerstore_core::{Merge, Reference, Result, Storage, StorageError};

/// In-memory store keyed by [`Reference`].
///
/// `merge` uses the entity's [`Merge`] implementation.
pub struct MemoryStore<T> {
    entries: RwLock<HashMap<Reference, T>>,
}

impl<T> MemoryStore<T> {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored references, sorted.
    pub fn references(&self) -> Vec<Reference> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut references: Vec<Reference> = entries.keys().cloned().collect();
        references.sort();
        references
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Reference, T>>> {
        self.entries
            .read()
            .map_err(|_| StorageError::unavailable("memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Reference, T>>> {
        self.entries
            .write()
            .map_err(|_| StorageError::unavailable("memory store lock poisoned"))
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Storage<T> for MemoryStore<T>
where
    T: Clone + Merge + Send + Sync,
{
    fn get(&self, reference: &Reference) -> Result<T> {
        self.read()?
            .get(reference)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(reference.clone()))
    }

    fn put(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.write()?.insert(reference.clone(), entity.clone());
        Ok(())
    }

    fn merge(&self, reference: &Reference, entity: &T) -> Result<()> {
        match self.write()?.entry(reference.clone()) {
            Entry::Occupied(mut existing) => existing.get_mut().merge_from(entity),
            Entry::Vacant(slot) => {
                slot.insert(entity.clone());
            }
        }
        Ok(())
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        self.write()?.remove(reference);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    #[test]
    fn test_memory_store_basic() {
        let store = MemoryStore::new();
        let greeting = Reference::new("dict", "greeting");

        store.put(&greeting, &String::from("Hello World!")).unwrap();
        assert_eq!(store.get(&greeting).unwrap(), "Hello World!");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_put_replaces() {
        let store = MemoryStore::new();
        let r = Reference::new("dict", "k");

        store.put(&r, &String::from("one")).unwrap();
        store.put(&r, &String::from("two")).unwrap();
        assert_eq!(store.get(&r).unwrap(), "two");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_not_found() {
        let store: MemoryStore<String> = MemoryStore::new();
        let err = store.get(&Reference::new("dict", "missing")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_memory_store_scheme_separates_entries() {
        let store = MemoryStore::new();
        store.put(&Reference::new("a", "k"), &vec![1u8]).unwrap();
        store.put(&Reference::new("b", "k"), &vec![2u8]).unwrap();

        assert_eq!(store.get(&Reference::new("a", "k")).unwrap(), vec![1]);
        assert_eq!(store.get(&Reference::new("b", "k")).unwrap(), vec![2]);
    }

    #[test]
    fn test_memory_store_merge_json() {
        let store: MemoryStore<Value> = MemoryStore::new();
        let r = Reference::new("doc", "user/1");

        store.merge(&r, &json!({"name": "ada"})).unwrap();
        store.merge(&r, &json!({"lang": "en"})).unwrap();

        assert_eq!(store.get(&r).unwrap(), json!({"name": "ada", "lang": "en"}));
    }

    #[test]
    fn test_memory_store_delete_idempotent() {
        let store = MemoryStore::new();
        let r = Reference::new("dict", "k");

        store.delete_at(&r).unwrap();
        store.put(&r, &String::from("v")).unwrap();
        store.delete_at(&r).unwrap();
        store.delete_at(&r).unwrap();

        assert!(store.get(&r).unwrap_err().is_not_found());
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_references_sorted() {
        let store = MemoryStore::new();
        store.put(&Reference::new("s", "b"), &vec![0u8]).unwrap();
        store.put(&Reference::new("s", "a"), &vec![0u8]).unwrap();

        assert_eq!(
            store.references(),
            vec![Reference::new("s", "a"), Reference::new("s", "b")]
        );
    }

    proptest! {
        #[test]
        fn test_put_then_get_any_reference(
            scheme in "[a-z]{1,8}",
            path in "[ -~]{0,40}",
            body in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            let store = MemoryStore::new();
            let r = Reference::new(scheme, path);
            store.put(&r, &body).unwrap();
            prop_assert_eq!(store.get(&r).unwrap(), body);
        }
    }
}
