use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use client_logging::{client_debug, client_warn};
use scrape_core::ScrapeResult;
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

/// Well-known key the submission view writes results under.
pub const HANDOFF_KEY: &str = "scrapeResults";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store key {0:?}")]
    InvalidKey(String),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Minimal key-value capability backing the results handoff.
/// Last write wins; there is no locking across processes.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// One file per key inside a session directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    writer: AtomicFileWriter,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }

    pub fn dir(&self) -> &Path {
        self.writer.dir()
    }

    fn file_name(key: &str) -> Result<String, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if valid {
            Ok(format!("{key}.json"))
        } else {
            Err(StoreError::InvalidKey(key.to_string()))
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.dir().join(Self::file_name(key).ok()?);
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                client_warn!("Failed to read store entry {:?}: {}", path, err);
                None
            }
        }
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.writer.write(&Self::file_name(key)?, value)?;
        client_debug!("Stored {} bytes at {:?}", value.len(), path);
        Ok(())
    }
}

/// Serializes `results` under [`HANDOFF_KEY`], replacing any previous set.
pub fn put_results<S: KeyValueStore + ?Sized>(
    store: &mut S,
    results: &[ScrapeResult],
) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(results)?;
    store.put(HANDOFF_KEY, &bytes)
}

/// Reads the stored result set. Missing or corrupt entries read as empty.
pub fn get_results<S: KeyValueStore + ?Sized>(store: &S) -> Vec<ScrapeResult> {
    let Some(bytes) = store.get(HANDOFF_KEY) else {
        return Vec::new();
    };
    match serde_json::from_slice(&bytes) {
        Ok(results) => results,
        Err(err) => {
            client_warn!("Ignoring unreadable stored results: {}", err);
            Vec::new()
        }
    }
}
