//! Settings store persisted as a flat TOML table.
//!
//! The file is opened, parsed and (for writes) rewritten on every call, so
//! two processes sharing one settings file see each other's changes and no
//! handle outlives an operation.  Reads of a missing or malformed file yield
//! an empty store; the malformed case is logged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use nodeopts_core::SettingValue;
use tracing::warn;

use super::backup::write_ini_backup;
use super::config::platform_config_base;
use crate::application::settings_store::{SettingsStore, StoreError};

type Entries = BTreeMap<String, SettingValue>;

/// A [`SettingsStore`] backed by one TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The per-user store for an application identity:
    /// `<config base>/<organization>/<application>.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoPlatformConfigDir`] when the platform config
    /// directory cannot be determined.
    pub fn for_application(organization: &str, application: &str) -> Result<Self, StoreError> {
        let base = platform_config_base().ok_or(StoreError::NoPlatformConfigDir)?;
        Ok(Self::new(
            base.join(organization).join(format!("{application}.toml")),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|e| StoreError::Format {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn load_or_empty(&self) -> Entries {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, "settings unreadable; treating as empty");
            Entries::new()
        })
    }

    fn save(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(entries).map_err(|e| StoreError::Format {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn update(&self, f: impl FnOnce(&mut Entries)) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        f(&mut entries);
        self.save(&entries)
    }
}

impl SettingsStore for TomlFileStore {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.load_or_empty().remove(key)
    }

    fn set(&mut self, key: &str, value: SettingValue) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn keys(&self) -> Vec<String> {
        self.load_or_empty().into_keys().collect()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.save(&Entries::new())
    }

    fn backup(&self, path: &Path) -> Result<(), StoreError> {
        let entries = self.load()?;
        write_ini_backup(path, entries.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = TomlFileStore::new(dir.path().join("Bitcoin-Qt.toml"));

        // Act / Assert
        assert_eq!(store.get("fListen"), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_values_survive_a_fresh_handle() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bitcoin").join("Bitcoin-Qt.toml");
        let mut store = TomlFileStore::new(&path);

        // Act
        store.set("fListen", SettingValue::Bool(false)).unwrap();
        store.set("nDatabaseCache", SettingValue::Int(1000)).unwrap();
        store.set("language", SettingValue::from("de")).unwrap();

        // Assert
        let reopened = TomlFileStore::new(&path);
        assert_eq!(reopened.get("fListen"), Some(SettingValue::Bool(false)));
        assert_eq!(reopened.get("nDatabaseCache"), Some(SettingValue::Int(1000)));
        assert_eq!(reopened.get("language"), Some(SettingValue::from("de")));
    }

    #[test]
    fn test_file_is_a_flat_readable_table() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut store = TomlFileStore::new(&path);

        // Act
        store.set("nNetworkPort", SettingValue::Int(8333)).unwrap();

        // Assert
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("nNetworkPort = 8333"));
    }

    #[test]
    fn test_malformed_file_reads_empty_but_write_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[[[ broken").unwrap();
        let mut store = TomlFileStore::new(&path);

        // Act
        let read = store.get("fListen");
        let write = store.set("fListen", SettingValue::Bool(true));

        // Assert
        assert_eq!(read, None);
        assert!(matches!(write, Err(StoreError::Format { .. })));
    }

    #[test]
    fn test_clear_then_backup() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut store = TomlFileStore::new(dir.path().join("settings.toml"));
        store.set("strDataDir", SettingValue::from("/data")).unwrap();
        let backup_path = dir.path().join("guisettings.ini.bak");

        // Act
        store.backup(&backup_path).unwrap();
        store.clear().unwrap();

        // Assert
        assert!(store.keys().is_empty());
        let backup = std::fs::read_to_string(&backup_path).unwrap();
        assert!(backup.contains("strDataDir=/data"));
    }
}
