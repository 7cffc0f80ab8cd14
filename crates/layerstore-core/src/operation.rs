//! Operation records produced by intercepting combinators.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reference::Reference;

/// Discriminator for the four storage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Get,
    Put,
    Merge,
    Delete,
}

impl OperationKind {
    /// Whether the operation changes stored state.
    pub fn is_write(self) -> bool {
        !matches!(self, Self::Get)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Merge => "merge",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attempted access, borrowed from the call it describes.
///
/// Built once per call, handed to a filter, then dropped. Filters only
/// see shared borrows, so they cannot alter the intercepted reference or
/// payload.
pub struct Operation<'a, T> {
    kind: OperationKind,
    reference: &'a Reference,
    entity: Option<&'a T>,
}

impl<'a, T> Operation<'a, T> {
    pub fn get(reference: &'a Reference) -> Self {
        Self {
            kind: OperationKind::Get,
            reference,
            entity: None,
        }
    }

    pub fn put(reference: &'a Reference, entity: &'a T) -> Self {
        Self {
            kind: OperationKind::Put,
            reference,
            entity: Some(entity),
        }
    }

    pub fn merge(reference: &'a Reference, entity: &'a T) -> Self {
        Self {
            kind: OperationKind::Merge,
            reference,
            entity: Some(entity),
        }
    }

    pub fn delete(reference: &'a Reference) -> Self {
        Self {
            kind: OperationKind::Delete,
            reference,
            entity: None,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn reference(&self) -> &'a Reference {
        self.reference
    }

    /// The payload, present for `Put` and `Merge` only.
    pub fn entity(&self) -> Option<&'a T> {
        self.entity
    }

    /// Copy into an owned record for filters that keep a trace.
    pub fn to_record(&self) -> OperationRecord<T>
    where
        T: Clone,
    {
        OperationRecord {
            kind: self.kind,
            reference: self.reference.clone(),
            entity: self.entity.cloned(),
        }
    }
}

impl<T> Clone for Operation<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Operation<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Operation<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("kind", &self.kind)
            .field("reference", self.reference)
            .field("entity", &self.entity)
            .finish()
    }
}

/// Owned copy of an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord<T> {
    pub kind: OperationKind,
    pub reference: Reference,
    pub entity: Option<T>,
}
