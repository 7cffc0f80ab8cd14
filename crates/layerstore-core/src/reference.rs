//! The addressing model.
//!
//! A [`Reference`] is the lookup key in every store. Equality and hashing
//! are structural over `(scheme, path)`; no canonicalization is applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable two-part address of an entity.
///
/// The scheme selects a logical storage domain, the path identifies the
/// entity within it. Path structure is opaque to the core; hierarchy is a
/// convention of the consuming application.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    scheme: String,
    path: String,
}

impl Reference {
    /// Create a reference from its two parts.
    pub fn new(scheme: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            path: path.into(),
        }
    }

    /// The logical storage domain.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The entity's path within its domain.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path split on `/`, after stripping leading slashes.
    ///
    /// Always yields at least one (possibly empty) component.
    pub fn path_components(&self) -> impl Iterator<Item = &str> {
        self.path.trim_start_matches('/').split('/')
    }

    /// The first path component, or `""` for an empty path.
    pub fn first_component(&self) -> &str {
        self.path_components().next().unwrap_or("")
    }

    /// A new reference in the same scheme with a different path.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self::new(self.scheme.clone(), path)
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reference({}://{})", self.scheme, self.path)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.path)
    }
}

impl<S: Into<String>, P: Into<String>> From<(S, P)> for Reference {
    fn from((scheme, path): (S, P)) -> Self {
        Self::new(scheme, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_structural_equality() {
        let a = Reference::new("dict", "greeting");
        let b = Reference::from(("dict", "greeting"));
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_no_case_folding() {
        assert_ne!(Reference::new("dict", "Key"), Reference::new("dict", "key"));
        assert_ne!(Reference::new("Dict", "key"), Reference::new("dict", "key"));
    }

    #[test]
    fn test_path_components() {
        let r = Reference::new("files", "/users/alice/profile.json");
        let parts: Vec<&str> = r.path_components().collect();
        assert_eq!(parts, vec!["users", "alice", "profile.json"]);
        assert_eq!(r.first_component(), "users");
    }

    #[test]
    fn test_empty_path_component() {
        let r = Reference::new("dict", "");
        assert_eq!(r.first_component(), "");
        assert_eq!(r.path_components().count(), 1);
    }

    #[test]
    fn test_display_and_debug() {
        let r = Reference::new("redis", "session/42");
        assert_eq!(r.to_string(), "redis://session/42");
        assert_eq!(format!("{:?}", r), "Reference(redis://session/42)");
    }

    #[test]
    fn test_with_path_keeps_scheme() {
        let r = Reference::new("files", "a.txt").with_path("/tmp/a.txt");
        assert_eq!(r.scheme(), "files");
        assert_eq!(r.path(), "/tmp/a.txt");
    }

    proptest! {
        #[test]
        fn test_components_rejoin_to_path(parts in prop::collection::vec("[a-z0-9.]{1,8}", 1..6)) {
            let path = parts.join("/");
            let r = Reference::new("s", format!("/{}", path));
            let rejoined: Vec<&str> = r.path_components().collect();
            prop_assert_eq!(rejoined.join("/"), path);
        }
    }
}
