//! Snapshot persistence boundary.
//!
//! The whole registry serializes to one JSON blob under a fixed namespace
//! key in a [`BlobStore`]. Loading happens once at startup; saving happens
//! after every mutating call (the desktop facade drives that). A malformed
//! or missing blob never surfaces to the user: load falls back to an empty
//! registry and reconciliation repairs partially-broken snapshots.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::common::collections::HashMap;
use crate::common::config::{Settings, data_dir};
use crate::model::registry::{Snapshot, WindowRegistry};

/// Namespace key under which the desktop snapshot lives.
pub const STORAGE_KEY: &str = "mural.desktop";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage backend: {0}")]
    Storage(#[from] std::io::Error),
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Narrow key-value blob interface the core persists through. Implementations
/// may be a browser storage bridge, a file, or an in-memory map in tests.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError>;
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), PersistError>;
}

/// Loads the registry, recovering silently from a missing or malformed blob.
pub fn load(store: &impl BlobStore, settings: &Settings) -> WindowRegistry {
    match try_load(store, settings) {
        Ok(Some(registry)) => {
            debug!(windows = registry.len(), "restored desktop snapshot");
            registry
        }
        Ok(None) => WindowRegistry::with_settings(settings),
        Err(err) => {
            warn!(%err, "discarding unreadable desktop snapshot");
            WindowRegistry::with_settings(settings)
        }
    }
}

fn try_load(
    store: &impl BlobStore,
    settings: &Settings,
) -> Result<Option<WindowRegistry>, PersistError> {
    let Some(blob) = store.get(STORAGE_KEY)? else {
        return Ok(None);
    };
    let snapshot: Snapshot = serde_json::from_slice(&blob)?;
    Ok(Some(WindowRegistry::from_snapshot(snapshot, settings)))
}

pub fn save(store: &mut impl BlobStore, registry: &WindowRegistry) -> Result<(), PersistError> {
    let blob = serde_json::to_vec(&registry.to_snapshot())?;
    store.put(STORAGE_KEY, &blob)
}

/// In-memory store for tests and headless embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), PersistError> {
        self.blobs.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// File-backed store keeping one file per key under a directory
/// (`~/.mural` by default).
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    pub fn default_dir() -> Self { Self::new(data_dir()) }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted namespaces, safe as file names.
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        match std::fs::read(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
