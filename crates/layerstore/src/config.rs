//! Declarative description of a storage stack.
//!
//! Every location is explicit: file roots and database paths are
//! configuration values, never inferred from the process.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::{LayerError, Result};

/// The leaf a stack is built on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// In-process map; contents are lost on drop.
    Memory,
    /// One file per reference under `root`.
    Files { root: PathBuf },
    /// SQLite database file.
    Sqlite { path: PathBuf },
    /// In-memory SQLite database.
    SqliteMemory,
}

/// Configuration for a byte-level storage stack.
///
/// Layers are applied inside-out in field order: backend, scheme
/// directories, sealing, cache levels, read-only guard, audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackConfig {
    pub backend: BackendConfig,
    /// Keep schemes apart by making the scheme the first path component.
    pub scheme_dirs: bool,
    /// Seal stored bytes with a key derived from this passphrase.
    pub sealing_passphrase: Option<String>,
    /// Number of in-memory cache levels stacked over the backend.
    pub cache_levels: usize,
    /// Reject every write.
    pub read_only: bool,
    /// Emit a tracing event per operation, at this level.
    pub audit: Option<AuditConfig>,
}

/// Options for the audit layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    /// Include payloads in events.
    pub payloads: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::Memory,
            scheme_dirs: false,
            sealing_passphrase: None,
            cache_levels: 0,
            read_only: false,
            audit: None,
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            payloads: false,
        }
    }
}

impl AuditConfig {
    pub fn level(&self) -> Result<Level> {
        self.level
            .parse()
            .map_err(|_| LayerError::Config(format!("unknown audit level {:?}", self.level)))
    }
}

impl StackConfig {
    /// Parse a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        match &self.backend {
            BackendConfig::Files { root } if root.as_os_str().is_empty() => {
                return Err(LayerError::Config("files backend needs a root".into()));
            }
            BackendConfig::Sqlite { path } if path.as_os_str().is_empty() => {
                return Err(LayerError::Config("sqlite backend needs a path".into()));
            }
            _ => {}
        }
        if matches!(&self.sealing_passphrase, Some(p) if p.is_empty()) {
            return Err(LayerError::Config("sealing passphrase is empty".into()));
        }
        if let Some(audit) = &self.audit {
            audit.level()?;
        }
        Ok(())
    }
}
