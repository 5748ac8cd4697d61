use crate::storage::{KvStore, KEY_SETTINGS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// User settings, persisted as a single JSON blob.
///
/// Field names stay camelCase on disk so blobs written by earlier releases
/// keep loading. A blob with missing fields is merged over the defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Base URL of the rendering service.
    pub api_endpoint: String,
    pub auto_refresh: bool,
    /// Seconds between automatic preview refreshes. Always >= 1 after load.
    pub refresh_interval: u32,
    /// Draw an alignment grid over the preview.
    pub show_grid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            auto_refresh: true,
            refresh_interval: 5,
            show_grid: false,
        }
    }
}

impl Settings {
    /// Load from storage, or return defaults if nothing usable is persisted.
    pub fn load(store: &KvStore) -> Self {
        let mut settings: Settings = store.get(KEY_SETTINGS).unwrap_or_default();
        settings.refresh_interval = settings.refresh_interval.max(1);
        settings
    }

    /// Persist the whole record, replacing any previous blob.
    pub fn save(&self, store: &KvStore) {
        store.set(KEY_SETTINGS, self);
    }

    /// Remove the persisted blob and return the default record.
    pub fn reset(store: &KvStore) -> Self {
        store.remove(KEY_SETTINGS);
        Settings::default()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_endpoint, "http://localhost:8000");
        assert!(settings.auto_refresh);
        assert_eq!(settings.refresh_interval, 5);
        assert!(!settings.show_grid);
    }

    #[test]
    fn test_save_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = KvStore::at(tmp.path().to_path_buf());

        let settings = Settings {
            api_endpoint: "http://cards.example:9090".to_string(),
            auto_refresh: false,
            refresh_interval: 30,
            show_grid: true,
        };
        settings.save(&store);

        let reloaded = Settings::load(&store);
        assert_eq!(reloaded, settings);

        // Saving what was just loaded must not change the stored record.
        reloaded.save(&store);
        assert_eq!(Settings::load(&store), reloaded);
    }

    #[test]
    fn test_partial_blob_merges_over_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = KvStore::at(tmp.path().to_path_buf());
        std::fs::write(
            tmp.path().join("settings.json"),
            r#"{"apiEndpoint": "http://other:8000"}"#,
        )
        .unwrap();

        let settings = Settings::load(&store);
        assert_eq!(settings.api_endpoint, "http://other:8000");
        assert!(settings.auto_refresh);
        assert_eq!(settings.refresh_interval, 5);
        assert!(!settings.show_grid);
    }

    #[test]
    fn test_zero_interval_clamps_to_one() {
        let tmp = tempfile::tempdir().unwrap();
        let store = KvStore::at(tmp.path().to_path_buf());
        std::fs::write(tmp.path().join("settings.json"), r#"{"refreshInterval": 0}"#).unwrap();

        assert_eq!(Settings::load(&store).refresh_interval, 1);
    }

    #[test]
    fn test_reset_restores_defaults_and_removes_blob() {
        let tmp = tempfile::tempdir().unwrap();
        let store = KvStore::at(tmp.path().to_path_buf());

        let settings = Settings {
            refresh_interval: 60,
            ..Settings::default()
        };
        settings.save(&store);

        let reset = Settings::reset(&store);
        assert_eq!(reset, Settings::default());
        assert!(store.get::<Settings>(KEY_SETTINGS).is_none());
    }

    #[test]
    fn test_disk_layout_uses_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("apiEndpoint"));
        assert!(json.contains("autoRefresh"));
        assert!(json.contains("refreshInterval"));
        assert!(json.contains("showGrid"));
    }
}
