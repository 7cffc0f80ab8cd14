//! Building stores from a [`StackConfig`].

use layerstore_combinators::{CacheStore, LoggingStore, ReadOnlyFilter, TracingFilter};
use layerstore_core::DynStorage;
use layerstore_mapping::{
    AddressStore, CodecStore, JsonCodec, SchemePrefix, SealedCodec, SealingKey, Utf8Codec,
};
use layerstore_store::{FileStore, MemoryStore, SqliteStore};
use serde_json::Value;
use tracing::info;

use crate::config::{BackendConfig, StackConfig};
use crate::error::Result;

/// Compose the byte-level store described by `config`.
pub fn build_stack(config: &StackConfig) -> Result<DynStorage<Vec<u8>>> {
    config.validate()?;

    let mut stack: DynStorage<Vec<u8>> = open_backend(&config.backend)?;

    if config.scheme_dirs {
        stack = Box::new(AddressStore::new(SchemePrefix, stack));
    }

    if let Some(passphrase) = &config.sealing_passphrase {
        let key = SealingKey::derive(passphrase.as_bytes());
        stack = Box::new(CodecStore::new(SealedCodec::new(key), stack));
    }

    for _ in 0..config.cache_levels {
        stack = Box::new(CacheStore::new(stack, MemoryStore::new()));
    }

    if config.read_only {
        stack = Box::new(LoggingStore::new(stack, ReadOnlyFilter));
    }

    // Outermost, so rejected writes are still audited.
    if let Some(audit) = &config.audit {
        let mut filter = TracingFilter::new(audit.level()?);
        if !audit.payloads {
            filter = filter.without_payload();
        }
        stack = Box::new(LoggingStore::new(stack, filter));
    }

    info!(
        backend = ?config.backend,
        cache_levels = config.cache_levels,
        sealed = config.sealing_passphrase.is_some(),
        read_only = config.read_only,
        "storage stack built"
    );
    Ok(stack)
}

/// A JSON document store over the stack described by `config`.
pub fn build_document_stack(config: &StackConfig) -> Result<DynStorage<Value>> {
    let bytes = build_stack(config)?;
    let text: CodecStore<String, Utf8Codec> = CodecStore::new(Utf8Codec, bytes);
    Ok(Box::new(CodecStore::new(JsonCodec::default(), text)))
}

fn open_backend(backend: &BackendConfig) -> Result<DynStorage<Vec<u8>>> {
    Ok(match backend {
        BackendConfig::Memory => Box::new(MemoryStore::<Vec<u8>>::new()),
        BackendConfig::Files { root } => Box::new(FileStore::open(root.clone())?),
        BackendConfig::Sqlite { path } => Box::new(SqliteStore::open(path)?),
        BackendConfig::SqliteMemory => Box::new(SqliteStore::open_memory()?),
    })
}
