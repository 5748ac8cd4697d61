// File backed key-value storage for small JSON blobs.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub const KEY_SETTINGS: &str = "settings";
pub const KEY_LANGUAGE: &str = "language";
pub const KEY_CUSTOM_TEMPLATES: &str = "custom-templates";

/// One JSON file per key under the platform config directory.
///
/// Storage being unavailable is not an error condition: reads return `None`
/// and writes are dropped with a log line, so callers fall back to their
/// defaults silently.
pub struct KvStore {
    dir: Option<PathBuf>,
}

impl KvStore {
    pub fn open() -> Self {
        let dir = directories::ProjectDirs::from("", "", "nowplay")
            .map(|proj| proj.config_dir().to_path_buf());
        if dir.is_none() {
            warn!("no config directory available, settings will not persist");
        }
        Self { dir }
    }

    /// Storage rooted at an explicit directory.
    pub fn at(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }

    fn blob_path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(format!("{key}.json")))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.blob_path(key)?;
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("ignoring unreadable blob {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let Some(path) = self.blob_path(key) else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("cannot create {}: {}", parent.display(), e);
                return;
            }
        }
        match serde_json::to_string_pretty(value) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!("failed to write {}: {}", path.display(), e);
                }
            }
            Err(e) => warn!("failed to serialize {key}: {e}"),
        }
    }

    pub fn remove(&self, key: &str) {
        if let Some(path) = self.blob_path(key) {
            let _ = fs::remove_file(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = KvStore::at(tmp.path().to_path_buf());
        store.set("answer", &vec![1u32, 2, 3]);
        let loaded: Option<Vec<u32>> = store.get("answer");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_key_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = KvStore::at(tmp.path().to_path_buf());
        assert_eq!(store.get::<String>("nope"), None);
    }

    #[test]
    fn test_corrupt_blob_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = KvStore::at(tmp.path().to_path_buf());
        fs::create_dir_all(tmp.path()).unwrap();
        fs::write(tmp.path().join("bad.json"), "{not json").unwrap();
        assert_eq!(store.get::<String>("bad"), None);
    }

    #[test]
    fn test_unavailable_storage_is_silent() {
        let store = KvStore { dir: None };
        store.set("key", &"value");
        assert_eq!(store.get::<String>("key"), None);
        store.remove("key");
    }

    #[test]
    fn test_remove_deletes_blob() {
        let tmp = tempfile::tempdir().unwrap();
        let store = KvStore::at(tmp.path().to_path_buf());
        store.set("gone", &42u8);
        store.remove("gone");
        assert_eq!(store.get::<u8>("gone"), None);
    }
}
