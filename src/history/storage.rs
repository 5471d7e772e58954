//! Persistent storage for request history.
//!
//! The whole history is kept as one JSON array under a single fixed key
//! ([`HISTORY_STORAGE_KEY`]) and rewritten on every change. There is no size
//! cap and no incremental write.

use super::models::{HistoryEntry, HistoryError};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Storage key holding the serialized history.
pub const HISTORY_STORAGE_KEY: &str = "request_history";

/// Durable string records addressed by key.
pub trait KeyValueStore: Send + Sync {
    /// Reads a record. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError>;

    /// Writes a record, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), HistoryError>;

    /// Deletes a record. Deleting a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), HistoryError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Opens the store in the user's data directory
    /// (`~/.local/share/webpost` on Linux).
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::StorageError` if no data directory is known.
    pub fn in_data_dir() -> Result<Self, HistoryError> {
        let base = dirs::data_dir().ok_or_else(|| {
            HistoryError::StorageError(std::io::Error::new(
                ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;
        Ok(Self::new(base.join("webpost")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), HistoryError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        // Write to a temporary file first, then swap it in.
        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        drop(temp_file);

        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), HistoryError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        Ok(self.records().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), HistoryError> {
        self.records().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), HistoryError> {
        self.records().remove(key);
        Ok(())
    }
}

/// Newest-first log of executed requests, mirrored to durable storage.
///
/// All mutation goes through this type; every change is persisted before
/// the call returns.
pub struct HistoryStore {
    store: Box<dyn KeyValueStore>,
    entries: Vec<HistoryEntry>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl HistoryStore {
    /// Loads persisted history from `store`.
    ///
    /// A missing record yields an empty history. An unreadable or corrupted
    /// record is logged and also yields an empty history.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let entries = read_entries(store.as_ref()).unwrap_or_else(|e| {
            log::warn!("Failed to load request history, starting empty: {}", e);
            Vec::new()
        });

        log::debug!("Loaded {} history entries", entries.len());
        Self { store, entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepends `entry` and persists the full list.
    ///
    /// The in-memory list is updated even if persisting fails.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        self.entries.insert(0, entry);
        self.persist()
    }

    /// Empties the history and deletes the persisted record.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        self.store.remove(HISTORY_STORAGE_KEY)
    }

    /// Replaces the whole history, in memory and on disk.
    pub fn replace_all(&mut self, entries: Vec<HistoryEntry>) -> Result<(), HistoryError> {
        self.entries = entries;
        self.persist()
    }

    fn persist(&self) -> Result<(), HistoryError> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(HISTORY_STORAGE_KEY, &json)
    }
}

fn read_entries(store: &dyn KeyValueStore) -> Result<Vec<HistoryEntry>, HistoryError> {
    match store.get(HISTORY_STORAGE_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
