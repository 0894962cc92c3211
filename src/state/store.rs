//! Local Key-Value Store
//!
//! Persists small string values (the draft text) across process restarts.
//! Entries never expire and there is no size limit.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DreamError, Result};

/// Key under which the draft text is mirrored.
pub const DRAFT_KEY: &str = "dreamText";

/// Synchronous key-value persistence.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A single stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEntry {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// On-disk layout of a [`FileStore`]: a JSON object keyed by entry name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreFile {
    pub entries: HashMap<String, StoreEntry>,
}

/// Key-value store backed by a single JSON file.
///
/// The file is read once on open and rewritten on every `set`.
pub struct FileStore {
    path: PathBuf,
    contents: StoreFile,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty; the next `set` overwrites it.
    pub fn open(path: &Path) -> Result<Self> {
        let contents = if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Store file unreadable, starting empty"
                );
                StoreFile::default()
            })
        } else {
            StoreFile::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    fn load(path: &Path) -> Result<StoreFile> {
        let raw = fs::read_to_string(path).map_err(|e| DreamError::StoreRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When `key` was last written, if it exists.
    pub fn updated_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.contents.entries.get(key).map(|e| e.updated_at)
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| DreamError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&self.contents)?;
        fs::write(&self.path, content).map_err(|e| DreamError::StoreWrite {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.contents.entries.get(key).map(|e| e.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.contents.entries.insert(
            key.to_string(),
            StoreEntry {
                value: value.to_string(),
                updated_at: Utc::now(),
            },
        );
        self.flush()
    }
}

/// In-memory store. Clones share the same map, so a clone handed to a
/// second session sees the first session's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(&temp_dir.path().join("store.json")).unwrap();

        assert_eq!(store.get(DRAFT_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(DRAFT_KEY, "a dream").unwrap();

        assert!(path.exists());
        assert!(store.updated_at(DRAFT_KEY).is_some());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(DRAFT_KEY, "first").unwrap();
        store.set(DRAFT_KEY, "second").unwrap();
        store.set("other", "value").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(DRAFT_KEY).unwrap(), Some("second".to_string()));
        assert_eq!(reopened.get("other").unwrap(), Some("value".to_string()));
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, r#"{"dreamText": {"value": "half"#).unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(DRAFT_KEY).unwrap(), None);

        store.set(DRAFT_KEY, "rewritten").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(DRAFT_KEY).unwrap(), Some("rewritten".to_string()));
    }

    #[test]
    fn test_file_is_keyed_by_entry_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(DRAFT_KEY, "a dream").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let object = raw.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object[DRAFT_KEY]["value"], "a dream");
        assert!(object[DRAFT_KEY]["updated_at"].is_string());
    }

    #[test]
    fn test_memory_store_clones_share_entries() {
        let mut store = MemoryStore::new();
        let other = store.clone();
        assert!(other.is_empty());

        store.set(DRAFT_KEY, "shared").unwrap();

        assert_eq!(other.get(DRAFT_KEY).unwrap(), Some("shared".to_string()));
        assert_eq!(other.len(), 1);
    }
}
