//! Routing: send each call to a store chosen from the reference.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use layerstore_core::{DynStorage, Reference, Result, Storage, StorageError};

/// Which part of a reference selects the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKey {
    /// The reference's scheme.
    Scheme,
    /// The first component of the reference's path.
    FirstPathComponent,
}

impl RouteKey {
    pub fn key_for<'a>(&self, reference: &'a Reference) -> &'a str {
        match self {
            Self::Scheme => reference.scheme(),
            Self::FirstPathComponent => reference.first_component(),
        }
    }
}

/// Dispatches to one of several stores by routing key.
///
/// The reference is passed to the chosen store unchanged. A key with no
/// registered store fails every operation with `NoRoute`.
pub struct SwitchStore<T> {
    key: RouteKey,
    routes: HashMap<String, DynStorage<T>>,
}

impl<T> SwitchStore<T> {
    pub fn new(key: RouteKey) -> Self {
        Self {
            key,
            routes: HashMap::new(),
        }
    }

    pub fn by_scheme() -> Self {
        Self::new(RouteKey::Scheme)
    }

    pub fn by_first_component() -> Self {
        Self::new(RouteKey::FirstPathComponent)
    }

    /// Register `store` for `key`, replacing any earlier registration.
    pub fn route(mut self, key: impl Into<String>, store: impl Storage<T> + 'static) -> Self {
        self.insert(key, store);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, store: impl Storage<T> + 'static) {
        self.routes.insert(key.into(), Box::new(store));
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    fn store_for(&self, reference: &Reference) -> Result<&dyn Storage<T>> {
        let key = self.key.key_for(reference);
        match self.routes.get(key) {
            Some(store) => {
                tracing::trace!(%reference, key, "routed");
                Ok(store.as_ref())
            }
            None => Err(StorageError::NoRoute {
                key: key.to_string(),
                reference: reference.clone(),
            }),
        }
    }
}

impl<T> Storage<T> for SwitchStore<T> {
    fn get(&self, reference: &Reference) -> Result<T> {
        self.store_for(reference)?.get(reference)
    }

    fn put(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.store_for(reference)?.put(reference, entity)
    }

    fn merge(&self, reference: &Reference, entity: &T) -> Result<()> {
        self.store_for(reference)?.merge(reference, entity)
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        self.store_for(reference)?.delete_at(reference)
    }
}
