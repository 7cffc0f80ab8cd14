//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use layerstore_combinators::CacheStore;
use layerstore_core::{Merge, Reference, Result, Storage, StorageError};
use layerstore_mapping::{CodecStore, JsonCodec};
use layerstore_store::{FileStore, MemoryStore, TextFileStore};

/// Three memory stores stacked as `(db <- redis_cache) <- in_memory`.
///
/// The leaves are shared, so tests can inspect each level directly.
pub struct CacheFixture<T> {
    pub db: Arc<MemoryStore<T>>,
    pub redis_cache: Arc<MemoryStore<T>>,
    pub in_memory: Arc<MemoryStore<T>>,
    pub top: CacheStore<T>,
}

impl<T> CacheFixture<T>
where
    T: Clone + Merge + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let db = Arc::new(MemoryStore::new());
        let redis_cache = Arc::new(MemoryStore::new());
        let in_memory = Arc::new(MemoryStore::new());
        let top = CacheStore::new(
            CacheStore::new(db.clone(), redis_cache.clone()),
            in_memory.clone(),
        );
        Self {
            db,
            redis_cache,
            in_memory,
            top,
        }
    }

    /// Whether every level holds something at `reference`.
    pub fn held_everywhere(&self, reference: &Reference) -> bool {
        self.levels().iter().all(|level| level.get(reference).is_ok())
    }

    /// Whether no level holds anything at `reference`.
    pub fn held_nowhere(&self, reference: &Reference) -> bool {
        self.levels()
            .iter()
            .all(|level| matches!(level.get(reference), Err(e) if e.is_not_found()))
    }

    fn levels(&self) -> [&MemoryStore<T>; 3] {
        [&self.db, &self.redis_cache, &self.in_memory]
    }
}

impl<T> Default for CacheFixture<T>
where
    T: Clone + Merge + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A temporary directory for file-backed stores, removed on drop.
pub struct TempFiles {
    dir: TempDir,
}

impl TempFiles {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap_or_else(|e| panic!("cannot create temp dir: {e}")),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Byte store rooted at the temp dir.
    pub fn files(&self) -> FileStore {
        FileStore::new(self.root())
    }

    /// Text store rooted at the temp dir.
    pub fn text_files(&self) -> TextFileStore {
        TextFileStore::new(self.root())
    }

    /// JSON documents stored as text files.
    pub fn json_docs(&self) -> CodecStore<Value, JsonCodec> {
        CodecStore::new(JsonCodec::default(), self.text_files())
    }

    /// Every regular file under the root, relative to it, sorted.
    pub fn residue(&self) -> Vec<PathBuf> {
        let mut found = Vec::new();
        collect_files(self.root(), self.root(), &mut found);
        found.sort();
        found
    }
}

impl Default for TempFiles {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_files(root: &Path, dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, found);
        } else if let Ok(relative) = path.strip_prefix(root) {
            found.push(relative.to_path_buf());
        }
    }
}

/// A store whose backend is always down.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unreachable;

impl<T> Storage<T> for Unreachable {
    fn get(&self, _reference: &Reference) -> Result<T> {
        Err(StorageError::unavailable("backend unreachable"))
    }

    fn put(&self, _reference: &Reference, _entity: &T) -> Result<()> {
        Err(StorageError::unavailable("backend unreachable"))
    }

    fn merge(&self, _reference: &Reference, _entity: &T) -> Result<()> {
        Err(StorageError::unavailable("backend unreachable"))
    }

    fn delete_at(&self, _reference: &Reference) -> Result<()> {
        Err(StorageError::unavailable("backend unreachable"))
    }
}
