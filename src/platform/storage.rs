// ElasChat - platform/storage.rs
//
// Local key-value storage: a flat string-to-string map persisted as one
// JSON object file in the platform data directory.
//
// - Every mutation is written atomically (write temp, rename final) so a
//   crash mid-write never corrupts the previous good file.
// - A missing file is an empty store (first run). A malformed file is also
//   treated as empty, with a warning, so a corrupt store never blocks startup.
// - Values are plain strings; structured values go through `get_json` /
//   `set_json`.

use crate::util::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File-backed string key-value store.
#[derive(Debug)]
pub struct KeyValueStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl KeyValueStore {
    /// Open the store at `path`, loading existing entries if present.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path).unwrap_or_default();
        tracing::debug!(path = %path.display(), keys = entries.len(), "Key-value store opened");
        Self { path, entries }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw string value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Decode the JSON value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|source| StorageError::Json {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    /// Store `value` under `key` and persist.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let previous = self.entries.insert(key.to_string(), value.into());
        if let Err(e) = self.persist() {
            // Keep memory consistent with disk.
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Encode `value` as JSON, store it under `key`, and persist.
    pub fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Json {
            key: key.to_string(),
            source,
        })?;
        self.set(key, json)
    }

    /// Remove `key` and persist. Returns the removed value, if any.
    pub fn remove(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(old) = self.entries.remove(key) else {
            return Ok(None);
        };
        if let Err(e) = self.persist() {
            self.entries.insert(key.to_string(), old);
            return Err(e);
        }
        Ok(Some(old))
    }

    /// Write all entries atomically.
    fn persist(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            StorageError::Json {
                key: "*".to_string(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json.as_bytes()).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            operation: "write",
            source,
        })?;

        std::fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = std::fs::remove_file(&tmp);
            StorageError::Io {
                path: self.path.clone(),
                operation: "rename",
                source,
            }
        })?;

        tracing::debug!(
            path = %self.path.display(),
            keys = self.entries.len(),
            "Key-value store saved"
        );
        Ok(())
    }
}

/// Read the store file. `None` on any failure; callers start empty.
fn read_entries(path: &Path) -> Option<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read key-value store");
            }
        })
        .ok()?;

    serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Key-value store is malformed; starting empty"
            );
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = KeyValueStore::open(dir.path().join("storage.json"));
        assert!(store.get("anything").is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = KeyValueStore::open(&path);
        store.set("@flag", "true").unwrap();
        store.set_json("@list", &vec![1, 2, 3]).unwrap();

        let reopened = KeyValueStore::open(&path);
        assert_eq!(reopened.get("@flag"), Some("true"));
        assert_eq!(
            reopened.get_json::<Vec<u32>>("@list").unwrap(),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = KeyValueStore::open(&path);
        store.set("k", "v").unwrap();
        assert_eq!(store.remove("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.remove("k").unwrap(), None);

        assert!(KeyValueStore::open(&path).get("k").is_none());
    }

    #[test]
    fn test_malformed_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, b"{{ not json").unwrap();

        let mut store = KeyValueStore::open(&path);
        assert!(store.get("k").is_none());
        // The next write replaces the corrupt file.
        store.set("k", "v").unwrap();
        assert_eq!(KeyValueStore::open(&path).get("k"), Some("v"));
    }

    #[test]
    fn test_get_json_reports_bad_value() {
        let dir = TempDir::new().unwrap();
        let mut store = KeyValueStore::open(dir.path().join("storage.json"));
        store.set("@user", "not json").unwrap();
        let err = store.get_json::<Vec<u32>>("@user").unwrap_err();
        assert!(matches!(err, StorageError::Json { ref key, .. } if key == "@user"));
    }

    #[test]
    fn test_leftover_temp_file_does_not_block_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let mut store = KeyValueStore::open(&path);
        store.set("k", "v2").unwrap();
        assert_eq!(KeyValueStore::open(&path).get("k"), Some("v2"));
    }
}
