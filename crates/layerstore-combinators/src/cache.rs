//! Read-through, write-through caching.

use layerstore_core::{DynStorage, Reference, Result, Storage};

/// Composes a primary store with a cache store.
///
/// - `get` consults the cache first; on a miss it reads the primary and
///   populates the cache before returning.
/// - `put` and `merge` go to the primary, then to the cache.
/// - `delete_at` deletes from both, always attempting both sides.
///
/// Only `NotFound` from the cache falls through to the primary. Any other
/// cache failure propagates. Nesting a `CacheStore` as the primary of
/// another gives a multi-level hierarchy; each level only knows its
/// immediate primary and cache.
pub struct CacheStore<T> {
    primary: DynStorage<T>,
    cache: DynStorage<T>,
}

impl<T> CacheStore<T> {
    pub fn new(primary: impl Storage<T> + 'static, cache: impl Storage<T> + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            cache: Box::new(cache),
        }
    }

    /// The authoritative store.
    pub fn primary(&self) -> &dyn Storage<T> {
        self.primary.as_ref()
    }

    pub fn cache(&self) -> &dyn Storage<T> {
        self.cache.as_ref()
    }
}

impl<T> Storage<T> for CacheStore<T> {
    fn get(&self, reference: &Reference) -> Result<T> {
        match self.cache.get(reference) {
            Ok(entity) => {
                tracing::debug!(%reference, "cache hit");
                return Ok(entity);
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(%reference, "cache miss");
            }
            Err(e) => return Err(e),
        }

        let entity = self.primary.get(reference)?;
        self.cache.put(reference, &entity)?;
        tracing::debug!(%reference, "cache populated");
        Ok(entity)
    }

    fn put(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.primary.put(reference, entity)?;
        self.cache.put(reference, entity)
    }

    fn merge(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.primary.merge(reference, entity)?;
        self.cache.merge(reference, entity)
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        let primary = self.primary.delete_at(reference);
        let cache = self.cache.delete_at(reference);
        if let Err(e) = &primary {
            tracing::warn!(%reference, error = %e, "primary delete failed; cache invalidated anyway");
        }
        primary.and(cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerstore_core::StorageError;
    use layerstore_store::MemoryStore;
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// A store whose backend is always down.
    struct Unreachable;

    impl Storage<String> for Unreachable {
        fn get(&self, _: &Reference) -> Result<String> {
            Err(StorageError::unavailable("backend unreachable"))
        }
        fn put(&self, _: &Reference, _: &String) -> Result<()> {
            Err(StorageError::unavailable("backend unreachable"))
        }
        fn merge(&self, _: &Reference, _: &String) -> Result<()> {
            Err(StorageError::unavailable("backend unreachable"))
        }
        fn delete_at(&self, _: &Reference) -> Result<()> {
            Err(StorageError::unavailable("backend unreachable"))
        }
    }

    type Leaf = Arc<MemoryStore<String>>;

    fn two_level() -> (Leaf, Leaf, CacheStore<String>) {
        let primary = Arc::new(MemoryStore::new());
        let cache = Arc::new(MemoryStore::new());
        let store = CacheStore::new(primary.clone(), cache.clone());
        (primary, cache, store)
    }

    fn r() -> Reference {
        Reference::new("dict", "greeting")
    }

    #[test]
    fn test_put_writes_through() {
        let (primary, cache, store) = two_level();
        store.put(&r(), &String::from("hello")).unwrap();

        assert_eq!(primary.get(&r()).unwrap(), "hello");
        assert_eq!(cache.get(&r()).unwrap(), "hello");
    }

    #[test]
    fn test_get_populates_on_miss() {
        let (primary, cache, store) = two_level();
        primary.put(&r(), &String::from("cold")).unwrap();
        assert!(cache.get(&r()).unwrap_err().is_not_found());

        assert_eq!(store.get(&r()).unwrap(), "cold");
        assert_eq!(cache.get(&r()).unwrap(), "cold");
    }

    #[test]
    fn test_hit_does_not_touch_primary() {
        let (primary, cache, store) = two_level();
        cache.put(&r(), &String::from("cached")).unwrap();

        assert_eq!(store.get(&r()).unwrap(), "cached");
        assert!(primary.is_empty());
    }

    #[test]
    fn test_miss_everywhere_leaves_cache_untouched() {
        let (_primary, cache, store) = two_level();
        assert!(store.get(&r()).unwrap_err().is_not_found());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_delete_clears_both_and_is_idempotent() {
        let (primary, cache, store) = two_level();
        store.put(&r(), &String::from("x")).unwrap();

        store.delete_at(&r()).unwrap();
        store.delete_at(&r()).unwrap();

        assert!(primary.get(&r()).unwrap_err().is_not_found());
        assert!(cache.get(&r()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_merge_goes_to_both() {
        let primary = Arc::new(MemoryStore::<Value>::new());
        let cache = Arc::new(MemoryStore::<Value>::new());
        let store = CacheStore::new(primary.clone(), cache.clone());

        store.put(&r(), &json!({"a": 1})).unwrap();
        store.merge(&r(), &json!({"b": 2})).unwrap();

        assert_eq!(primary.get(&r()).unwrap(), json!({"a": 1, "b": 2}));
        assert_eq!(cache.get(&r()).unwrap(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_merge_into_cold_cache_keeps_only_incoming() {
        let primary = Arc::new(MemoryStore::<Value>::new());
        let cache = Arc::new(MemoryStore::<Value>::new());
        let store = CacheStore::new(primary.clone(), cache.clone());

        primary.put(&r(), &json!({"a": 1})).unwrap();
        store.merge(&r(), &json!({"b": 2})).unwrap();

        assert_eq!(primary.get(&r()).unwrap(), json!({"a": 1, "b": 2}));
        assert_eq!(cache.get(&r()).unwrap(), json!({"b": 2}));
        assert_eq!(store.get(&r()).unwrap(), json!({"b": 2}));
    }

    #[test]
    fn test_primary_failure_skips_cache_write() {
        let cache = Arc::new(MemoryStore::new());
        let store = CacheStore::new(Unreachable, cache.clone());

        let err = store.put(&r(), &String::from("x")).unwrap_err();
        assert!(matches!(err, StorageError::BackendUnavailable(_)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_failure_is_not_a_miss() {
        let primary = Arc::new(MemoryStore::new());
        primary.put(&r(), &String::from("x")).unwrap();
        let store = CacheStore::new(primary, Unreachable);

        assert!(matches!(
            store.get(&r()).unwrap_err(),
            StorageError::BackendUnavailable(_)
        ));
    }

    #[test]
    fn test_delete_attempts_cache_when_primary_fails() {
        let cache = Arc::new(MemoryStore::new());
        cache.put(&r(), &String::from("stale")).unwrap();
        let store = CacheStore::new(Unreachable, cache.clone());

        assert!(store.delete_at(&r()).is_err());
        assert!(cache.is_empty());
    }

    proptest! {
        #[test]
        fn test_write_through_completeness(
            path in "[a-z/]{1,16}",
            value in "[ -~]{0,32}",
        ) {
            let (primary, cache, store) = two_level();
            let reference = Reference::new("p", path);

            store.put(&reference, &value).unwrap();
            prop_assert_eq!(primary.get(&reference).unwrap(), value.clone());
            prop_assert_eq!(cache.get(&reference).unwrap(), value);
        }

        #[test]
        fn test_read_through_population(
            path in "[a-z/]{1,16}",
            value in "[ -~]{0,32}",
        ) {
            let (primary, cache, store) = two_level();
            let reference = Reference::new("p", path);

            primary.put(&reference, &value).unwrap();
            prop_assert_eq!(store.get(&reference).unwrap(), value.clone());
            prop_assert_eq!(cache.get(&reference).unwrap(), value);
        }
    }
}
