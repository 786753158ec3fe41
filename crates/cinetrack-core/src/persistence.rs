use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize collection: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// The two durable collections, plus the last result set shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Watchlist,
    Watched,
    Results,
}

impl CollectionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Watchlist => "watchlist",
            CollectionKey::Watched => "watched",
            CollectionKey::Results => "results",
        }
    }
}

/// Durable string key/value medium
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per entry under a directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key)?;
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// In-process store, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Typed, namespaced access to the collections in a [`KeyValueStore`].
///
/// Entries hold bare JSON arrays under `<namespace>-<collection>`.
pub struct PersistenceAdapter<S> {
    store: S,
    namespace: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn storage_key(&self, key: CollectionKey) -> String {
        format!("{}-{}", self.namespace, key.as_str())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save<T: Serialize>(&mut self, key: CollectionKey, items: &[T]) -> Result<(), StorageError> {
        let storage_key = self.storage_key(key);
        let json = serde_json::to_string(items)?;
        self.store.set(&storage_key, &json)?;
        debug!("Saved {} ({} items)", storage_key, items.len());
        Ok(())
    }

    /// Load a collection; absent, unreadable or corrupt entries load as empty
    pub fn load<T: DeserializeOwned>(&self, key: CollectionKey) -> Vec<T> {
        let storage_key = self.storage_key(key);

        let content = match self.store.get(&storage_key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!("No stored entry for {}", storage_key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read {}: {}. Starting with an empty collection.", storage_key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<T>>>(&content) {
            Ok(items) => {
                let items = items.unwrap_or_default();
                info!("Loaded {} ({} items)", storage_key, items.len());
                items
            }
            Err(e) => {
                warn!(
                    "Corrupted entry detected for {}: {}. Starting with an empty collection.",
                    storage_key, e
                );
                Vec::new()
            }
        }
    }

    pub fn clear(&mut self, key: CollectionKey) -> Result<(), StorageError> {
        let storage_key = self.storage_key(key);
        self.store.remove(&storage_key)?;
        debug!("Cleared {}", storage_key);
        Ok(())
    }

    /// Whether a durable entry exists for the collection
    pub fn contains(&self, key: CollectionKey) -> bool {
        matches!(self.store.get(&self.storage_key(key)), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinetrack_models::seed_movies;
    use cinetrack_models::MovieRecord;

    #[test]
    fn test_save_and_load_round_trip() {
        let mut adapter = PersistenceAdapter::new(MemoryKeyValueStore::new(), "cinetrack");
        let movies = seed_movies();

        adapter.save(CollectionKey::Watchlist, &movies).unwrap();
        let loaded: Vec<MovieRecord> = adapter.load(CollectionKey::Watchlist);
        assert_eq!(loaded, movies);
        assert!(adapter.store().get("cinetrack-watchlist").unwrap().is_some());
    }

    #[test]
    fn test_missing_entry_loads_empty() {
        let adapter = PersistenceAdapter::new(MemoryKeyValueStore::new(), "cinetrack");
        let loaded: Vec<MovieRecord> = adapter.load(CollectionKey::Watched);
        assert!(loaded.is_empty());
        assert!(!adapter.contains(CollectionKey::Watched));
    }

    #[test]
    fn test_corrupt_entry_loads_empty() {
        let mut store = MemoryKeyValueStore::new();
        store.set("cinetrack-watchlist", "{not json").unwrap();
        store.set("cinetrack-watched", "{\"an\": \"object\"}").unwrap();
        let adapter = PersistenceAdapter::new(store, "cinetrack");

        let watchlist: Vec<MovieRecord> = adapter.load(CollectionKey::Watchlist);
        let watched: Vec<MovieRecord> = adapter.load(CollectionKey::Watched);
        assert!(watchlist.is_empty());
        assert!(watched.is_empty());
    }

    #[test]
    fn test_null_entry_loads_empty() {
        let mut store = MemoryKeyValueStore::new();
        store.set("cinetrack-watchlist", "null").unwrap();
        let adapter = PersistenceAdapter::new(store, "cinetrack");
        let loaded: Vec<MovieRecord> = adapter.load(CollectionKey::Watchlist);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_clear_removes_entry() {
        let mut adapter = PersistenceAdapter::new(MemoryKeyValueStore::new(), "ns");
        adapter.save(CollectionKey::Watched, &seed_movies()).unwrap();
        assert!(adapter.contains(CollectionKey::Watched));

        adapter.clear(CollectionKey::Watched).unwrap();
        assert!(!adapter.contains(CollectionKey::Watched));
        adapter.clear(CollectionKey::Watched).unwrap();
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut adapter = PersistenceAdapter::new(FileKeyValueStore::new(dir.path()).unwrap(), "cinetrack");

        adapter.save(CollectionKey::Watchlist, &seed_movies()).unwrap();
        assert!(dir.path().join("cinetrack-watchlist.json").exists());
        assert!(!dir.path().join("cinetrack-watchlist.json.tmp").exists());

        let reopened = PersistenceAdapter::new(FileKeyValueStore::new(dir.path()).unwrap(), "cinetrack");
        let loaded: Vec<MovieRecord> = reopened.load(CollectionKey::Watchlist);
        assert_eq!(loaded, seed_movies());
    }

    #[test]
    fn test_file_store_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cinetrack-watched.json"), "definitely not json").unwrap();

        let adapter = PersistenceAdapter::new(FileKeyValueStore::new(dir.path()).unwrap(), "cinetrack");
        let loaded: Vec<MovieRecord> = adapter.load(CollectionKey::Watched);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileKeyValueStore::new(dir.path()).unwrap();
        assert!(matches!(store.set("../escape", "[]"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.get("a/b"), Err(StorageError::InvalidKey(_))));
    }
}
