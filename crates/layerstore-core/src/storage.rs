//! Storage trait: the contract every store, leaf or combinator, satisfies.
//!
//! The contract is a capability set over a [`Reference`]. Combinators hold
//! their inner stores as [`DynStorage`] handles and delegate to them, so
//! trees of arbitrary depth compose from the same four operations.

use std::sync::Arc;

use crate::error::Result;
use crate::reference::Reference;

/// The four-operation storage contract.
///
/// All methods are synchronous and take `&self`. A store that keeps state
/// synchronises it internally so a single operation is atomic with
/// respect to concurrent callers.
///
/// # Contract
///
/// - `get` fails with `NotFound` when nothing is stored at the reference.
/// - `put` replaces any prior value.
/// - `merge` combines with the stored value using entity-specific logic,
///   and behaves as `put` when nothing is stored.
/// - `delete_at` is idempotent: deleting a missing entity is not an error.
pub trait Storage<T>: Send + Sync {
    /// Fetch the entity addressed by `reference`.
    fn get(&self, reference: &Reference) -> Result<T>;

    /// Store `entity` at `reference`, replacing any prior value.
    fn put(&self, reference: &Reference, entity: &T) -> Result<()>;

    /// Combine `entity` with the value already at `reference`.
    fn merge(&self, reference: &Reference, entity: &T) -> Result<()>;

    /// Remove any entity at `reference`.
    fn delete_at(&self, reference: &Reference) -> Result<()>;
}

/// Owned, type-erased store handle held by combinators.
pub type DynStorage<T> = Box<dyn Storage<T>>;

impl<T, S: Storage<T> + ?Sized> Storage<T> for &S {
    fn get(&self, reference: &Reference) -> Result<T> {
        (**self).get(reference)
    }

    fn put(&self, reference: &Reference, entity: &T) -> Result<()> {
        (**self).put(reference, entity)
    }

    fn merge(&self, reference: &Reference, entity: &T) -> Result<()> {
        (**self).merge(reference, entity)
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        (**self).delete_at(reference)
    }
}

impl<T, S: Storage<T> + ?Sized> Storage<T> for Box<S> {
    fn get(&self, reference: &Reference) -> Result<T> {
        (**self).get(reference)
    }

    fn put(&self, reference: &Reference, entity: &T) -> Result<()> {
        (**self).put(reference, entity)
    }

    fn merge(&self, reference: &Reference, entity: &T) -> Result<()> {
        (**self).merge(reference, entity)
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        (**self).delete_at(reference)
    }
}

/// Shared handles let an application keep inspecting a store it has
/// also handed to a combinator.
impl<T, S: Storage<T> + ?Sized> Storage<T> for Arc<S> {
    fn get(&self, reference: &Reference) -> Result<T> {
        (**self).get(reference)
    }

    fn put(&self, reference: &Reference, entity: &T) -> Result<()> {
        (**self).put(reference, entity)
    }

    fn merge(&self, reference: &Reference, entity: &T) -> Result<()> {
        (**self).merge(reference, entity)
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        (**self).delete_at(reference)
    }
}

/// Extension trait for common store patterns.
pub trait StorageExt<T>: Storage<T> {
    /// Fetch, mapping `NotFound` to `None`.
    ///
    /// Note that this is a real `get`: through a cache it populates.
    fn get_optional(&self, reference: &Reference) -> Result<Option<T>> {
        match self.get(reference) {
            Ok(entity) => Ok(Some(entity)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Whether an entity is stored at `reference`.
    fn contains(&self, reference: &Reference) -> Result<bool> {
        Ok(self.get_optional(reference)?.is_some())
    }

    /// Box this store into a [`DynStorage`] handle.
    fn boxed(self) -> DynStorage<T>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<T, S: Storage<T> + ?Sized> StorageExt<T> for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapStore(Mutex<HashMap<Reference, u32>>);

    impl Storage<u32> for MapStore {
        fn get(&self, reference: &Reference) -> Result<u32> {
            self.0
                .lock()
                .unwrap()
                .get(reference)
                .copied()
                .ok_or_else(|| StorageError::NotFound(reference.clone()))
        }

        fn put(&self, reference: &Reference, entity: &u32) -> Result<()> {
            self.0.lock().unwrap().insert(reference.clone(), *entity);
            Ok(())
        }

        fn merge(&self, reference: &Reference, entity: &u32) -> Result<()> {
            *self.0.lock().unwrap().entry(reference.clone()).or_default() += entity;
            Ok(())
        }

        fn delete_at(&self, reference: &Reference) -> Result<()> {
            self.0.lock().unwrap().remove(reference);
            Ok(())
        }
    }

    fn map_store() -> MapStore {
        MapStore(Mutex::new(HashMap::new()))
    }

    #[test]
    fn test_arc_alias_observes_writes() {
        let leaf = Arc::new(map_store());
        let handle: DynStorage<u32> = Box::new(leaf.clone());
        let r = Reference::new("n", "counter");

        handle.put(&r, &7).unwrap();
        assert_eq!(leaf.get(&r).unwrap(), 7);

        handle.merge(&r, &3).unwrap();
        assert_eq!(leaf.get(&r).unwrap(), 10);
    }

    #[test]
    fn test_get_optional_and_contains() {
        let store = map_store();
        let r = Reference::new("n", "x");

        assert_eq!(store.get_optional(&r).unwrap(), None);
        assert!(!store.contains(&r).unwrap());

        store.put(&r, &1).unwrap();
        assert_eq!(store.get_optional(&r).unwrap(), Some(1));
        assert!(store.contains(&r).unwrap());
    }

    #[test]
    fn test_borrowed_store_is_a_store() {
        let store = map_store();
        let borrowed: &dyn Storage<u32> = &store;
        let r = Reference::new("n", "y");

        borrowed.put(&r, &5).unwrap();
        borrowed.delete_at(&r).unwrap();
        borrowed.delete_at(&r).unwrap();
        assert!(store.get(&r).unwrap_err().is_not_found());
    }
}
