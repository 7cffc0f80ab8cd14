//! Operation interception: the filter contract and the store that applies it.

use std::sync::Arc;

use layerstore_core::{DynStorage, Operation, Reference, Result, Storage};

use crate::filter::TracingFilter;

/// Observer invoked with every operation before it proceeds.
///
/// `write` is synchronous: the intercepted call waits for it. Returning
/// an error vetoes the operation. A filter only sees shared borrows of the
/// reference and payload; any storage side effect it wants goes through
/// its own stores.
pub trait Filter<T>: Send + Sync {
    fn write(&self, operation: &Operation<'_, T>) -> Result<()>;
}

impl<T, F: Filter<T> + ?Sized> Filter<T> for Arc<F> {
    fn write(&self, operation: &Operation<'_, T>) -> Result<()> {
        (**self).write(operation)
    }
}

impl<T, F: Filter<T> + ?Sized> Filter<T> for Box<F> {
    fn write(&self, operation: &Operation<'_, T>) -> Result<()> {
        (**self).write(operation)
    }
}

/// Store that reports every call to a [`Filter`] and then delegates.
///
/// The record is built and filtered before the inner store is called, so
/// the audit trail holds attempted operations even when the inner store
/// then fails. A filter error is returned without calling the inner store.
pub struct LoggingStore<T> {
    inner: DynStorage<T>,
    filter: Box<dyn Filter<T>>,
}

impl<T> LoggingStore<T> {
    pub fn new(inner: impl Storage<T> + 'static, filter: impl Filter<T> + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            filter: Box::new(filter),
        }
    }

    /// Wrap `inner` with the default diagnostic filter.
    pub fn traced(inner: impl Storage<T> + 'static) -> Self
    where
        T: std::fmt::Debug,
    {
        Self::new(inner, TracingFilter::default())
    }

    pub fn inner(&self) -> &dyn Storage<T> {
        self.inner.as_ref()
    }
}

impl<T> Storage<T> for LoggingStore<T> {
    fn get(&self, reference: &Reference) -> Result<T> {
        self.filter.write(&Operation::get(reference))?;
        self.inner.get(reference)
    }

    fn put(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.filter.write(&Operation::put(reference, entity))?;
        self.inner.put(reference, entity)
    }

    fn merge(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.filter.write(&Operation::merge(reference, entity))?;
        self.inner.merge(reference, entity)
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        self.filter.write(&Operation::delete(reference))?;
        self.inner.delete_at(reference)
    }
}
