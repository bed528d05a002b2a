//! Key-value persistence backends
//!
//! The entity store persists each collection under its own key. Backends only
//! move strings around; encoding and the fall-back-to-defaults policy live in
//! [`crate::store`].

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Generic key-value layer behind the entity store
pub trait KeyValueStore: Send + Sync {
    /// Load the value stored under `key`, `Ok(None)` when absent
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: one `<key>.toml` file per key inside a data directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.toml", key))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(content))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        // Write to a sibling, then rename over the target
        let path = self.path_for(key);
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, value).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

/// In-memory store, used by tests and throwaway sessions
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. with hand-written TOML
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Raw value currently stored under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_missing_key_is_absent() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.load("tasks").unwrap().is_none());
    }

    #[test]
    fn test_file_store_save_and_load() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.save("notes", "title = \"x\"\n").unwrap();

        assert!(dir.path().join("nested").join("notes.toml").exists());
        assert!(!dir.path().join("nested").join("notes.toml.tmp").exists());
        assert_eq!(
            store.load("notes").unwrap().as_deref(),
            Some("title = \"x\"\n")
        );
    }

    #[test]
    fn test_memory_store_overwrites() {
        let store = MemoryStore::new().with_entry("tasks", "a");
        store.save("tasks", "b").unwrap();
        assert_eq!(store.load("tasks").unwrap().as_deref(), Some("b"));
        assert!(store.load("meetings").unwrap().is_none());
    }
}
