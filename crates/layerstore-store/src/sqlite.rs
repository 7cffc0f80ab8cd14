//! SQLite implementation of the Storage trait.
//!
//! Raw-bytes leaf backed by a single `entities` table keyed by
//! `(scheme, path)`. Uses rusqlite with bundled SQLite.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use layerstore_core::{Reference, Result, Storage, StorageError};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreError;
use crate::migration::{self, now_millis};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex; each operation is a single statement,
/// so it is atomic with respect to other callers. `merge` is an upsert
/// that replaces the stored bytes.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> crate::Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> crate::Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored entities.
    pub fn count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM entities", [], |row| row.get(0))?;
            Ok(n as usize)
        })
    }

    /// All references stored under `scheme`, ordered by path.
    pub fn references(&self, scheme: &str) -> Result<Vec<Reference>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT path FROM entities WHERE scheme = ?1 ORDER BY path")?;
            let paths = stmt
                .query_map(params![scheme], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(paths
                .into_iter()
                .map(|path| Reference::new(scheme, path))
                .collect())
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::unavailable(format!("mutex poisoned: {}", e)))
    }

    /// Run `f` against the connection, surfacing failures as
    /// `BackendUnavailable`.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> crate::Result<T>,
    {
        let conn = self.lock()?;
        f(&conn).map_err(StorageError::from)
    }

    fn upsert(&self, reference: &Reference, body: &[u8]) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO entities (scheme, path, body, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (scheme, path)
                 DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
                params![reference.scheme(), reference.path(), body, now_millis()],
            )?;
            Ok(())
        })
    }
}

impl Storage<Vec<u8>> for SqliteStore {
    fn get(&self, reference: &Reference) -> Result<Vec<u8>> {
        let body = self.with_conn(|conn| {
            conn.query_row(
                "SELECT body FROM entities WHERE scheme = ?1 AND path = ?2",
                params![reference.scheme(), reference.path()],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()
            .map_err(StoreError::from)
        })?;

        body.ok_or_else(|| StorageError::NotFound(reference.clone()))
    }

    fn put(&self, reference: &Reference, entity: &Vec<u8>) -> Result<()> {
        self.upsert(reference, entity)
    }

    fn merge(&self, reference: &Reference, entity: &Vec<u8>) -> Result<()> {
        self.upsert(reference, entity)
    }

    fn delete_at(&self, reference: &Reference) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM entities WHERE scheme = ?1 AND path = ?2",
                params![reference.scheme(), reference.path()],
            )?;
            Ok(())
        })
    }
}
