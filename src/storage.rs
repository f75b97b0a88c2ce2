//! Durable key-value records for user preferences.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Record holding the serialized favorite set
pub const FAVORITES_KEY: &str = "favorites";
/// Record holding the last dispatched search query
pub const LAST_SEARCH_KEY: &str = "lastSearch";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Named string records that outlive the process
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One file per record inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so readers never see a torn record
        let mut file = tempfile::NamedTempFile::new_in(&self.dir)?;
        file.write_all(value.as_bytes())?;
        file.flush()?;
        file.persist(self.path(key)).map_err(|e| e.error)?;

        debug!("Wrote record {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: seed a record
    pub fn with_record(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.records.write().insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.records.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested"));

        assert!(store.get(LAST_SEARCH_KEY).unwrap().is_none());

        store.set(LAST_SEARCH_KEY, "dune").unwrap();
        assert_eq!(store.get(LAST_SEARCH_KEY).unwrap().as_deref(), Some("dune"));

        store.set(LAST_SEARCH_KEY, "arrival").unwrap();
        assert_eq!(
            store.get(LAST_SEARCH_KEY).unwrap().as_deref(),
            Some("arrival")
        );
    }

    #[test]
    fn test_file_store_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set(FAVORITES_KEY, "[]").unwrap();
        store.remove(FAVORITES_KEY).unwrap();
        assert!(store.get(FAVORITES_KEY).unwrap().is_none());

        // Removing an absent record is fine
        store.remove(FAVORITES_KEY).unwrap();
    }

    #[test]
    fn test_file_store_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set(FAVORITES_KEY, "[]").unwrap();
        store.set(FAVORITES_KEY, "[1]").unwrap();

        let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new().with_record(LAST_SEARCH_KEY, "dune");

        assert_eq!(store.get(LAST_SEARCH_KEY).unwrap().as_deref(), Some("dune"));

        store.remove(LAST_SEARCH_KEY).unwrap();
        assert!(store.get(LAST_SEARCH_KEY).unwrap().is_none());
    }
}
