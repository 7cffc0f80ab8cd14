//! Entity-specific merge semantics.
//!
//! `merge` has no meaningful default for opaque payloads, so each entity
//! type states its own rule here:
//!
//! | Entity              | Rule                                              |
//! |---------------------|---------------------------------------------------|
//! | `serde_json::Value` | structural union, objects merged key by key        |
//! | `String`            | replace                                           |
//! | `Vec<u8>`, `Bytes`  | replace                                           |

use bytes::Bytes;
use serde_json::Value;

/// Combine an incoming entity into an existing one.
pub trait Merge {
    fn merge_from(&mut self, incoming: &Self);
}

impl Merge for String {
    fn merge_from(&mut self, incoming: &Self) {
        self.clone_from(incoming);
    }
}

impl Merge for Vec<u8> {
    fn merge_from(&mut self, incoming: &Self) {
        self.clone_from(incoming);
    }
}

impl Merge for Bytes {
    fn merge_from(&mut self, incoming: &Self) {
        *self = incoming.clone();
    }
}

impl Merge for Value {
    fn merge_from(&mut self, incoming: &Self) {
        match (self, incoming) {
            (Value::Object(existing), Value::Object(incoming)) => {
                for (key, value) in incoming {
                    match existing.get_mut(key) {
                        Some(slot) => slot.merge_from(value),
                        None => {
                            existing.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
            (slot, incoming) => *slot = incoming.clone(),
        }
    }
}
