//! Preference persistence behind a key-value interface.
//!
//! Filter and sort state survive sessions; the record list never does.
//! Storage failures and corrupt values are logged and fall back to
//! defaults rather than propagating.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::filters::Filters;
use crate::sort::SortOptions;

/// Storage key for the persisted filter state.
pub const FILTERS_KEY: &str = "trawler.filters";
/// Storage key for the persisted sort preferences.
pub const SORT_KEY: &str = "trawler.sort";

/// String key-value store provided by the hosting shell (browser local
/// storage, a config directory, an in-memory map for tests).
pub trait SettingsStore {
    /// Read a value, `None` when absent.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);
    /// Delete a value if present.
    fn remove(&self, key: &str);
}

/// Ephemeral in-memory settings, used by tests and throwaway shells.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemorySettings {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Settings persisted as one JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    path: PathBuf,
}

impl JsonFileSettings {
    /// Use the JSON file at `path`; it is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "settings file is corrupt, starting fresh");
            BTreeMap::new()
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) {
        let serialized = match serde_json::to_string_pretty(map) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize settings");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, serialized) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to write settings file");
        }
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map);
        }
    }
}

/// Load persisted filters, falling back to defaults when absent or corrupt.
#[must_use]
pub fn load_filters(settings: &dyn SettingsStore) -> Filters {
    load_or_default(settings, FILTERS_KEY)
}

/// Persist the filter state.
pub fn persist_filters(settings: &dyn SettingsStore, filters: &Filters) {
    persist(settings, FILTERS_KEY, filters);
}

/// Load persisted sort preferences, falling back to defaults.
#[must_use]
pub fn load_sort_options(settings: &dyn SettingsStore) -> SortOptions {
    load_or_default(settings, SORT_KEY)
}

/// Persist the sort preferences.
pub fn persist_sort_options(settings: &dyn SettingsStore, sort: &SortOptions) {
    persist(settings, SORT_KEY, sort);
}

fn load_or_default<T>(settings: &dyn SettingsStore, key: &str) -> T
where
    T: Default + serde::de::DeserializeOwned,
{
    let Some(raw) = settings.get(key) else {
        return T::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        tracing::warn!(key, error = %err, "persisted value is corrupt, using defaults");
        T::default()
    })
}

fn persist<T: serde::Serialize>(settings: &dyn SettingsStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(serialized) => settings.set(key, &serialized),
        Err(err) => tracing::warn!(key, error = %err, "failed to serialize preference"),
    }
}
