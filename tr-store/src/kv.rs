//! JSON key-value file store
//!
//! One JSON object per file, read and rewritten whole. This mimics the
//! mobile app's on-device key-value storage: no transactions, no
//! per-record keys. A missing or corrupt file behaves as empty so a
//! bad blob degrades the display instead of crashing it.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct KvStore {
    path: PathBuf,
}

impl KvStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location for a store file: the platform data dir,
    /// falling back to the temp dir when none is available.
    pub fn default_path(file_name: &str) -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("traceride")
            .join(file_name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Map<String, Value> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Map::new(),
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!(path = %self.path.display(), "store file is not a JSON object, treating as empty");
                Map::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store file unreadable, treating as empty");
                Map::new()
            }
        }
    }

    /// Read one value. Missing key, missing file and corrupt file all
    /// come back as `None`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.read_map().get(key).cloned()
    }

    /// Write one value, rewriting the whole file
    pub fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_store(tag: &str) -> KvStore {
        let path = std::env::temp_dir().join(format!(
            "traceride-kv-{}-{}.json",
            tag,
            uuid::Uuid::new_v4()
        ));
        KvStore::open(path)
    }

    #[test]
    fn test_get_missing_file_is_none() {
        let store = temp_store("missing");
        assert!(store.get("vehicles").is_none());
    }

    #[test]
    fn test_set_then_get() {
        let store = temp_store("roundtrip");
        store.set("vehicles", json!([{"plate": "ABC-1234"}])).unwrap();
        store.set("user", json!({"email": "a@b.com"})).unwrap();

        // Both keys survive in the same file
        assert_eq!(store.get("vehicles").unwrap()[0]["plate"], "ABC-1234");
        assert_eq!(store.get("user").unwrap()["email"], "a@b.com");

        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let store = temp_store("corrupt");
        std::fs::write(store.path(), "{ not json at all").unwrap();
        assert!(store.get("vehicles").is_none());

        // And writing through the corruption recovers the file
        store.set("vehicles", json!([])).unwrap();
        assert_eq!(store.get("vehicles").unwrap(), json!([]));

        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_non_object_file_reads_as_empty() {
        let store = temp_store("array");
        std::fs::write(store.path(), "[1, 2, 3]").unwrap();
        assert!(store.get("vehicles").is_none());

        let _ = std::fs::remove_file(store.path());
    }
}
