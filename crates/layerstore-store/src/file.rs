//! File-backed leaf stores.
//!
//! A reference's path names a file relative to an explicit root
//! directory. The scheme is not part of the layout; put an
//! address-mapping store in front to separate schemes on disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use layerstore_core::{Reference, Result, Storage, StorageError};
use tempfile::Builder;

use crate::error::StoreError;

/// Raw-bytes file store rooted at a directory.
///
/// Writes land in a temporary file beside the target and are renamed
/// into place, so a reader never observes a partial file. `merge`
/// replaces the file, the rule for byte entities.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store rooted at `root`, creating the directory now.
    pub fn open(root: impl Into<PathBuf>) -> crate::Result<Self> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root)?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location for `reference`.
    ///
    /// Leading slashes are stripped; `..` is rejected so every location
    /// stays under the root, and a path must name at least one file
    /// component (`""` and `.` name the root itself).
    pub fn path_for(&self, reference: &Reference) -> Result<PathBuf> {
        let relative = Path::new(reference.path().trim_start_matches('/'));
        if relative.as_os_str().is_empty() {
            return Err(invalid(reference, "empty path"));
        }
        let mut named = false;
        for component in relative.components() {
            match component {
                Component::Normal(_) => named = true,
                Component::CurDir => {}
                _ => return Err(invalid(reference, "path escapes the store root")),
            }
        }
        if !named {
            return Err(invalid(reference, "path names the store root"));
        }
        Ok(self.root.join(relative))
    }

    /// Whether `path` cannot hold a stored file: it is a directory, or a
    /// directory on the way to it is a regular file.
    fn holds_no_file(&self, path: &Path) -> bool {
        path.is_dir()
            || path
                .ancestors()
                .skip(1)
                .take_while(|dir| *dir != self.root.as_path())
                .any(Path::is_file)
    }

    fn read(&self, reference: &Reference) -> Result<Vec<u8>> {
        let path = self.path_for(reference)?;
        fs::read(&path).map_err(|e| {
            if self.holds_no_file(&path) {
                StorageError::NotFound(reference.clone())
            } else {
                io_failure(reference, &path, e)
            }
        })
    }

    fn write_atomic(&self, reference: &Reference, contents: &[u8]) -> Result<()> {
        let path = self.path_for(reference)?;
        let parent = path
            .parent()
            .ok_or_else(|| invalid(reference, "no parent directory"))?;
        fs::create_dir_all(parent).map_err(|e| io_failure(reference, parent, e))?;

        let mut staged = Builder::new()
            .prefix(".layerstore-")
            .suffix(".tmp")
            .tempfile_in(parent)
            .map_err(|e| io_failure(reference, parent, e))?;
        staged
            .write_all(contents)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| io_failure(reference, staged.path(), e))?;

        // A failed rename drops the staged file, leaving any old target intact.
        staged.persist(&path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e.error, "atomic rename failed");
            io_failure(reference, &path, e.error)
        })?;
        Ok(())
    }

    fn remove(&self, reference: &Reference) -> Result<()> {
        let path = self.path_for(reference)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(_) if self.holds_no_file(&path) => Ok(()),
            Err(e) => Err(io_failure(reference, &path, e)),
        }
    }
}

impl Storage<Vec<u8>> for FileStore {
    fn get(&self, reference: &Reference) -> Result<Vec<u8>> {
        self.read(reference)
    }

    fn put(&self, reference: &Reference, entity: &Vec<u8>) -> Result<()> {
        self.write_atomic(reference, entity)
    }

    fn merge(&self, reference: &Reference, entity: &Vec<u8>) -> Result<()> {
        self.write_atomic(reference, entity)
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        self.remove(reference)
    }
}

/// UTF-8 text file store.
///
/// Same layout and atomicity as [`FileStore`]. Content that is not valid
/// UTF-8 reads back as `CorruptData`.
#[derive(Debug, Clone)]
pub struct TextFileStore {
    files: FileStore,
}

impl TextFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            files: FileStore::new(root),
        }
    }

    pub fn open(root: impl Into<PathBuf>) -> crate::Result<Self> {
        Ok(Self {
            files: FileStore::open(root)?,
        })
    }

    pub fn root(&self) -> &Path {
        self.files.root()
    }

    pub fn path_for(&self, reference: &Reference) -> Result<PathBuf> {
        self.files.path_for(reference)
    }
}

impl Storage<String> for TextFileStore {
    fn get(&self, reference: &Reference) -> Result<String> {
        let raw = self.files.read(reference)?;
        String::from_utf8(raw).map_err(|e| StorageError::corrupt(reference, e))
    }

    fn put(&self, reference: &Reference, entity: &String) -> Result<()> {
        self.files.write_atomic(reference, entity.as_bytes())
    }

    fn merge(&self, reference: &Reference, entity: &String) -> Result<()> {
        self.files.write_atomic(reference, entity.as_bytes())
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        self.files.remove(reference)
    }
}

fn invalid(reference: &Reference, reason: &str) -> StorageError {
    StorageError::InvalidReference {
        reference: reference.clone(),
        reason: reason.to_string(),
    }
}

fn io_failure(reference: &Reference, path: &Path, e: io::Error) -> StorageError {
    if e.kind() == io::ErrorKind::NotFound {
        return StorageError::NotFound(reference.clone());
    }
    StoreError::Io(io::Error::new(e.kind(), format!("{}: {}", path.display(), e))).into()
}
