use crate::api::ApiError;
use crate::storage::{KvStore, KEY_CUSTOM_TEMPLATES};
use std::collections::BTreeMap;
use tracing::warn;

/// Shipped with the rendering service; used whenever the list fetch fails.
pub const FALLBACK_TEMPLATES: [&str; 4] = ["default", "modern-card", "glassmorphism", "minimalist"];

/// The server's template list plus the current selection.
pub struct TemplateRegistry {
    pub templates: Vec<String>,
    pub current: String,
    /// True while the list is the built-in fallback rather than the server's.
    pub degraded: bool,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
            current: "default".to_string(),
            degraded: false,
        }
    }

    /// Install the outcome of a list fetch. The server's ordering is kept
    /// verbatim on success; any failure yields the fixed fallback names.
    pub fn apply_list(&mut self, result: Result<Vec<String>, ApiError>) {
        match result {
            Ok(templates) => {
                self.templates = templates;
                self.degraded = false;
            }
            Err(e) => {
                warn!("template list fetch failed: {e}");
                self.templates = FALLBACK_TEMPLATES.iter().map(|s| s.to_string()).collect();
                self.degraded = true;
            }
        }
    }

    /// Ids are not validated against the list; an unknown id simply fails
    /// downstream at fetch time.
    pub fn select(&mut self, id: impl Into<String>) {
        self.current = id.into();
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// "modern-card" -> "Modern Card".
pub fn display_name(id: &str) -> String {
    id.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// User-authored markup keyed by name, persisted as one JSON blob.
/// Entries are only ever added or overwritten, never pruned.
#[derive(Default)]
pub struct CustomTemplates {
    entries: BTreeMap<String, String>,
}

impl CustomTemplates {
    pub fn load(store: &KvStore) -> Self {
        Self {
            entries: store.get(KEY_CUSTOM_TEMPLATES).unwrap_or_default(),
        }
    }

    pub fn save(&self, store: &KvStore) {
        store.set(KEY_CUSTOM_TEMPLATES, &self.entries);
    }

    /// Same-name entries are overwritten silently.
    pub fn insert(&mut self, name: String, markup: String) {
        self.entries.insert(name, markup);
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport_error() -> ApiError {
        ApiError::Status(503)
    }

    #[test]
    fn test_failed_fetch_yields_exact_fallback_list() {
        let mut registry = TemplateRegistry::new();
        registry.apply_list(Err(transport_error()));
        assert_eq!(
            registry.templates,
            vec!["default", "modern-card", "glassmorphism", "minimalist"]
        );
        assert!(registry.degraded);
    }

    #[test]
    fn test_server_order_is_kept() {
        let mut registry = TemplateRegistry::new();
        registry.apply_list(Ok(vec!["zeta".into(), "alpha".into()]));
        assert_eq!(registry.templates, vec!["zeta", "alpha"]);
        assert!(!registry.degraded);
    }

    #[test]
    fn test_recovery_clears_degraded_flag() {
        let mut registry = TemplateRegistry::new();
        registry.apply_list(Err(transport_error()));
        registry.apply_list(Ok(vec!["default".into()]));
        assert!(!registry.degraded);
    }

    #[test]
    fn test_select_accepts_unknown_id() {
        let mut registry = TemplateRegistry::new();
        registry.apply_list(Ok(vec!["default".into()]));
        registry.select("does-not-exist");
        assert_eq!(registry.current, "does-not-exist");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("modern-card"), "Modern Card");
        assert_eq!(display_name("default"), "Default");
        assert_eq!(display_name("--x"), "X");
    }

    #[test]
    fn test_custom_save_overwrites_same_name() {
        let mut custom = CustomTemplates::default();
        custom.insert("test1".into(), "<svg>one</svg>".into());
        custom.insert("test1".into(), "<svg>two</svg>".into());
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.get("test1").unwrap(), "<svg>two</svg>");
    }

    #[test]
    fn test_custom_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = KvStore::at(tmp.path().to_path_buf());

        let mut custom = CustomTemplates::default();
        custom.insert("mine".into(), "<svg/>".into());
        custom.save(&store);

        let reloaded = CustomTemplates::load(&store);
        assert_eq!(reloaded.get("mine").unwrap(), "<svg/>");
        assert_eq!(reloaded.len(), 1);
    }
}
