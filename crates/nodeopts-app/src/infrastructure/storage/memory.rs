//! In-memory settings store.

use std::collections::BTreeMap;
use std::path::Path;

use nodeopts_core::SettingValue;

use super::backup::write_ini_backup;
use crate::application::settings_store::{SettingsStore, StoreError};

/// A [`SettingsStore`] backed by a sorted map.  Nothing survives the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, SettingValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SettingValue)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn entries(&self) -> &BTreeMap<String, SettingValue> {
        &self.entries
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }

    fn backup(&self, path: &Path) -> Result<(), StoreError> {
        write_ini_backup(path, self.entries.iter().map(|(k, v)| (k.as_str(), v)))
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
