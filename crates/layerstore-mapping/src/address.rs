//! Address translation: map a logical reference to a physical one.
//!
//! Only the reference is transformed; entities pass through unchanged.
//! A map must be injective over the references actually used, or two
//! logical entities share one physical location. Nothing here checks it.

use std::marker::PhantomData;

use layerstore_core::{DynStorage, Reference, Result, Storage};

/// Translation from logical to physical reference.
pub trait AddressMap: Send + Sync {
    fn map(&self, reference: &Reference) -> Reference;
}

impl<F> AddressMap for F
where
    F: Fn(&Reference) -> Reference + Send + Sync,
{
    fn map(&self, reference: &Reference) -> Reference {
        self(reference)
    }
}

/// Places every path under a base directory, keeping the scheme.
///
/// `RootedPaths::new("/srv/data")` maps `files://a/b.txt` to
/// `files:///srv/data/a/b.txt`.
#[derive(Debug, Clone)]
pub struct RootedPaths {
    base: String,
}

impl RootedPaths {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl AddressMap for RootedPaths {
    fn map(&self, reference: &Reference) -> Reference {
        let base = self.base.trim_end_matches('/');
        let path = reference.path().trim_start_matches('/');
        reference.with_path(format!("{}/{}", base, path))
    }
}

/// Makes the scheme the first path component.
///
/// Lets stores whose layout ignores the scheme, such as file stores,
/// keep different schemes apart: `doc://a.json` becomes `doc://doc/a.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemePrefix;

impl AddressMap for SchemePrefix {
    fn map(&self, reference: &Reference) -> Reference {
        let path = reference.path().trim_start_matches('/');
        reference.with_path(format!("{}/{}", reference.scheme(), path))
    }
}

/// Store that rewrites the reference before delegating.
pub struct AddressStore<T, A: AddressMap> {
    map: A,
    inner: DynStorage<T>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, A: AddressMap> AddressStore<T, A> {
    pub fn new(map: A, inner: impl Storage<T> + 'static) -> Self {
        Self {
            map,
            inner: Box::new(inner),
            _entity: PhantomData,
        }
    }

    /// The physical reference `reference` is stored under.
    pub fn resolve(&self, reference: &Reference) -> Reference {
        self.map.map(reference)
    }
}

impl<T, A: AddressMap> Storage<T> for AddressStore<T, A> {
    fn get(&self, reference: &Reference) -> Result<T> {
        self.inner.get(&self.resolve(reference))
    }

    fn put(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.inner.put(&self.resolve(reference), entity)
    }

    fn merge(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.inner.merge(&self.resolve(reference), entity)
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        self.inner.delete_at(&self.resolve(reference))
    }
}
