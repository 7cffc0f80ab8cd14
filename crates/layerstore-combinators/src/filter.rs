//! Stock filters for [`LoggingStore`](crate::LoggingStore).

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use layerstore_core::{Operation, OperationKind, OperationRecord, Result, StorageError};
use tracing::Level;

use crate::logging::Filter;

/// Renders each operation as a `tracing` event.
///
/// The default filter. Events carry `kind` and `reference` fields, plus
/// the payload's `Debug` form unless disabled.
#[derive(Debug, Clone, Copy)]
pub struct TracingFilter {
    level: Level,
    payload: bool,
}

impl TracingFilter {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            payload: true,
        }
    }

    /// Omit payloads from events, for large or sensitive entities.
    pub fn without_payload(mut self) -> Self {
        self.payload = false;
        self
    }
}

impl Default for TracingFilter {
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}

impl<T: fmt::Debug> Filter<T> for TracingFilter {
    fn write(&self, operation: &Operation<'_, T>) -> Result<()> {
        let kind = operation.kind();
        let reference = operation.reference();
        let entity = operation.entity().filter(|_| self.payload);

        macro_rules! emit {
            ($lvl:expr) => {
                tracing::event!($lvl, %kind, %reference, entity = ?entity, "storage operation")
            };
        }

        if self.level == Level::ERROR {
            emit!(Level::ERROR);
        } else if self.level == Level::WARN {
            emit!(Level::WARN);
        } else if self.level == Level::INFO {
            emit!(Level::INFO);
        } else if self.level == Level::DEBUG {
            emit!(Level::DEBUG);
        } else {
            emit!(Level::TRACE);
        }
        Ok(())
    }
}

/// Accumulates an in-memory trace of operations.
///
/// Clones share one trace, so a test can keep a clone while the store
/// owns the other.
pub struct RecordingFilter<T> {
    records: Arc<Mutex<Vec<OperationRecord<T>>>>,
}

impl<T: Clone> RecordingFilter<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every record so far, oldest first.
    pub fn records(&self) -> Vec<OperationRecord<T>> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn kinds(&self) -> Vec<OperationKind> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|record| record.kind)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<T: Clone> Default for RecordingFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordingFilter<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Clone + Send> Filter<T> for RecordingFilter<T> {
    fn write(&self, operation: &Operation<'_, T>) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(operation.to_record());
        Ok(())
    }
}

/// Rejects every write; reads proceed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnlyFilter;

impl<T> Filter<T> for ReadOnlyFilter {
    fn write(&self, operation: &Operation<'_, T>) -> Result<()> {
        if operation.kind().is_write() {
            return Err(StorageError::Rejected {
                kind: operation.kind(),
                reference: operation.reference().clone(),
                reason: "store is read-only".to_string(),
            });
        }
        Ok(())
    }
}

/// Adapts a closure into a [`Filter`].
pub struct FnFilter<F> {
    f: F,
}

impl<F> FnFilter<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T, F> Filter<T> for FnFilter<F>
where
    F: Fn(&Operation<'_, T>) -> Result<()> + Send + Sync,
{
    fn write(&self, operation: &Operation<'_, T>) -> Result<()> {
        (self.f)(operation)
    }
}
