//! Key-value persistence backends.
//!
//! The leaderboard only needs string keys and string (JSON) values, the same
//! shape as browser local storage. Two backends ship:
//!
//! - `MemoryStorage`: in-process map, for tests and embedding
//! - `FileStorage`: one `<key>.json` file per key under a directory
//!
//! Writes are last-writer-wins. Two processes sharing a directory can race;
//! nothing here guards against that.

use log::debug;
use rustc_hash::FxHashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Errors a storage backend can report.
///
/// `LeaderboardStore` never surfaces these to players; it logs and falls
/// back to empty state.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying I/O failed.
    Io(io::Error),
    /// Value could not be encoded.
    Encode(serde_json::Error),
    /// Key cannot be mapped onto the backend (e.g. contains a path separator).
    InvalidKey(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O failed: {}", e),
            StorageError::Encode(e) => write!(f, "could not encode value: {}", e),
            StorageError::InvalidKey(key) => write!(f, "invalid storage key: {:?}", key),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Encode(e) => Some(e),
            StorageError::InvalidKey(_) => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Encode(e)
    }
}

/// String key-value store.
pub trait Storage {
    /// Read the value for `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: FxHashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed storage: each key lives in `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        debug!(target: "storage", "Opened file storage at {}", dir.display());
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::write(path, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pocket-arcade-storage-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_get_set() {
        let mut storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();

        assert_eq!(storage.get("k").unwrap(), Some("v2".to_string()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_file_missing_key_is_none() {
        let dir = temp_dir("missing");
        let storage = FileStorage::open(&dir).unwrap();

        assert_eq!(storage.get("coinflip-leaderboard").unwrap(), None);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_file_roundtrip_across_instances() {
        let dir = temp_dir("roundtrip");
        {
            let mut storage = FileStorage::open(&dir).unwrap();
            storage.set("coinflip-best-streak", "4").unwrap();
        }

        let storage = FileStorage::open(&dir).unwrap();
        assert_eq!(storage.get("coinflip-best-streak").unwrap(), Some("4".to_string()));
        assert!(dir.join("coinflip-best-streak.json").exists());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_file_rejects_path_keys() {
        let dir = temp_dir("badkey");
        let mut storage = FileStorage::open(&dir).unwrap();

        let err = storage.set("../escape", "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert!(storage.get("").is_err());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::InvalidKey("a/b".to_string());
        assert_eq!(err.to_string(), "invalid storage key: \"a/b\"");

        let io_err: StorageError = io::Error::new(io::ErrorKind::Other, "disk gone").into();
        assert!(io_err.to_string().contains("disk gone"));
    }
}
