//! The identity combinator.

use layerstore_core::{DynStorage, Reference, Result, Storage};

/// Delegates every call unchanged.
///
/// Useful as a seam: it erases the inner store's type behind a named
/// wrapper without adding behavior.
pub struct PassThrough<T> {
    inner: DynStorage<T>,
}

impl<T> PassThrough<T> {
    pub fn new(inner: impl Storage<T> + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    pub fn into_inner(self) -> DynStorage<T> {
        self.inner
    }
}

impl<T> Storage<T> for PassThrough<T> {
    fn get(&self, reference: &Reference) -> Result<T> {
        self.inner.get(reference)
    }

    fn put(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.inner.put(reference, entity)
    }

    fn merge(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.inner.merge(reference, entity)
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        self.inner.delete_at(reference)
    }
}
