//! Persistence of the node's rewritable configuration.
//!
//! Two files back the RW config:
//!
//! - `bitcoin_rw.conf` in the base data directory, `name=value` lines the
//!   node reads at startup after its main config file;
//! - `settings.json` in the chain data directory, the node's live settings.
//!   Only entries written with `also_settings_json` land here, and keys this
//!   component does not manage are preserved.
//!
//! [`PersistentArgs`] wraps an [`ArgsTable`] and writes both files after
//! every RW change.  A failed write is logged and the in-memory change kept:
//! the dialog has no error channel for RW config writes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use nodeopts_core::args::conf::{parse_config, render_config};
use nodeopts_core::{ArgsTable, Chain, RuntimeArgs, SoftSet};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::chain_data_dir;

pub const RW_CONFIG_FILE_NAME: &str = "bitcoin_rw.conf";
pub const SETTINGS_JSON_FILE_NAME: &str = "settings.json";

/// Error type for RW config and `settings.json` persistence.
#[derive(Debug, Error)]
pub enum RwConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `settings.json` is not a JSON object.
    #[error("malformed settings file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads a node config file, returning no entries when it does not exist.
///
/// # Errors
///
/// Returns [`RwConfigError::Io`] for read failures other than "not found".
pub fn read_config_file(path: &Path, chain: Chain) -> Result<Vec<(String, String)>, RwConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(parse_config(&text, chain)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(RwConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Locations of the RW config and `settings.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RwConfigFile {
    rw_path: PathBuf,
    settings_path: PathBuf,
    chain: Chain,
}

impl RwConfigFile {
    /// The files the node uses for `chain` under the base `data_dir`.
    pub fn for_data_dir(data_dir: &Path, chain: Chain) -> Self {
        Self {
            rw_path: data_dir.join(RW_CONFIG_FILE_NAME),
            settings_path: chain_data_dir(data_dir, chain).join(SETTINGS_JSON_FILE_NAME),
            chain,
        }
    }

    pub fn rw_path(&self) -> &Path {
        &self.rw_path
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Entries of the RW config for this chain.
    ///
    /// # Errors
    ///
    /// See [`read_config_file`].
    pub fn read_entries(&self) -> Result<Vec<(String, String)>, RwConfigError> {
        read_config_file(&self.rw_path, self.chain)
    }

    /// Replaces the RW config with `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`RwConfigError::Io`] when the file cannot be written.
    pub fn write_entries(&self, entries: &[(String, String)]) -> Result<(), RwConfigError> {
        write_file(&self.rw_path, &render_config(entries))
    }

    /// Deletes the RW config.  A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RwConfigError::Io`] when the file exists but cannot be removed.
    pub fn remove_entries(&self) -> Result<(), RwConfigError> {
        match std::fs::remove_file(&self.rw_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(RwConfigError::Io {
                path: self.rw_path.clone(),
                source,
            }),
        }
    }

    /// Current content of `settings.json`, empty when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RwConfigError::Json`] when the file is not a JSON object.
    pub fn read_settings(&self) -> Result<Map<String, Value>, RwConfigError> {
        let text = match std::fs::read_to_string(&self.settings_path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(RwConfigError::Io {
                    path: self.settings_path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| RwConfigError::Json {
            path: self.settings_path.clone(),
            source,
        })
    }

    /// Writes `managed` into `settings.json` and drops the `removed` keys,
    /// leaving every other key untouched.  Integer values are stored as JSON
    /// numbers.
    ///
    /// # Errors
    ///
    /// Returns [`RwConfigError`] when the existing file cannot be read or the
    /// new one cannot be written.
    pub fn update_settings<'a>(
        &self,
        managed: &BTreeMap<String, String>,
        removed: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), RwConfigError> {
        let mut settings = self.read_settings()?;
        for key in removed {
            settings.remove(key);
        }
        for (key, value) in managed {
            let json = match value.parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => Value::from(value.as_str()),
            };
            settings.insert(key.clone(), json);
        }
        let text = serde_json::to_string_pretty(&Value::Object(settings)).map_err(|source| {
            RwConfigError::Json {
                path: self.settings_path.clone(),
                source,
            }
        })?;
        write_file(&self.settings_path, &text)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), RwConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| RwConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, content).map_err(|source| RwConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Runtime arguments whose RW config is mirrored to disk.
#[derive(Debug, Clone)]
pub struct PersistentArgs {
    table: ArgsTable,
    file: RwConfigFile,
}

impl PersistentArgs {
    /// Loads the RW config from `file` into `table`, which should already
    /// hold the command-line and config-file layers.
    ///
    /// # Errors
    ///
    /// Returns [`RwConfigError`] when the RW config exists but cannot be read.
    pub fn load(mut table: ArgsTable, file: RwConfigFile) -> Result<Self, RwConfigError> {
        let entries = file.read_entries()?;
        debug!(path = %file.rw_path().display(), entries = entries.len(), "loaded RW config");
        table.load_rw_config(entries);
        Ok(Self { table, file })
    }

    pub fn table(&self) -> &ArgsTable {
        &self.table
    }

    pub fn file(&self) -> &RwConfigFile {
        &self.file
    }

    fn persist(&self, removed: &[String]) {
        if let Err(e) = self.file.write_entries(self.table.rw_config_entries()) {
            warn!(error = %e, "failed to write RW config");
        }
        let removed = removed.iter().map(String::as_str);
        if let Err(e) = self.file.update_settings(self.table.rw_settings(), removed) {
            warn!(error = %e, "failed to update node settings file");
        }
    }
}

impl RuntimeArgs for PersistentArgs {
    fn arg(&self, name: &str) -> Option<String> {
        self.table.arg(name)
    }

    fn is_externally_set(&self, name: &str) -> bool {
        self.table.is_externally_set(name)
    }

    fn soft_set_arg(&mut self, name: &str, value: &str) -> SoftSet {
        self.table.soft_set_arg(name, value)
    }

    fn force_set_arg(&mut self, name: &str, value: &str) {
        self.table.force_set_arg(name, value);
    }

    fn modify_rw_config(&mut self, name: &str, value: &str, also_settings_json: bool) {
        self.table.modify_rw_config(name, value, also_settings_json);
        self.persist(&[]);
    }

    fn erase_rw_config(&mut self) {
        let removed: Vec<String> = self.table.rw_settings().keys().cloned().collect();
        self.table.erase_rw_config();
        if let Err(e) = self.file.remove_entries() {
            warn!(error = %e, "failed to delete RW config");
        }
        let removed = removed.iter().map(String::as_str);
        if let Err(e) = self.file.update_settings(self.table.rw_settings(), removed) {
            warn!(error = %e, "failed to update node settings file");
        }
    }

    fn rw_config_has_prune_option(&self) -> bool {
        self.table.rw_config_has_prune_option()
    }

    fn rw_config_entry(&self, name: &str) -> Option<String> {
        self.table.rw_config_entry(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(dir: &Path) -> PersistentArgs {
        let file = RwConfigFile::for_data_dir(dir, Chain::Main);
        PersistentArgs::load(ArgsTable::new(), file).unwrap()
    }

    #[test]
    fn test_missing_rw_config_loads_empty() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let args = loaded(dir.path());

        // Assert
        assert!(args.table().rw_config_entries().is_empty());
        assert!(!args.rw_config_has_prune_option());
    }

    #[test]
    fn test_modify_rw_config_writes_both_files() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut args = loaded(dir.path());

        // Act
        args.modify_rw_config("prune", "550", true);
        args.modify_rw_config("peercfilters", "1", false);

        // Assert
        let rw = std::fs::read_to_string(dir.path().join(RW_CONFIG_FILE_NAME)).unwrap();
        assert!(rw.contains("prune=550"));
        assert!(rw.contains("peercfilters=1"));
        let settings = args.file().read_settings().unwrap();
        assert_eq!(settings.get("prune"), Some(&Value::from(550)));
        assert!(!settings.contains_key("peercfilters"));
    }

    #[test]
    fn test_reload_sees_prune_and_live_values() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(RW_CONFIG_FILE_NAME),
            "prune=550\naddresstype=legacy\n",
        )
        .unwrap();

        // Act
        let args = loaded(dir.path());

        // Assert
        assert!(args.rw_config_has_prune_option());
        assert_eq!(args.get_arg("-addresstype", ""), "legacy");
    }

    #[test]
    fn test_settings_json_keeps_unmanaged_keys() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_JSON_FILE_NAME),
            r#"{"wallet": ["hot"]}"#,
        )
        .unwrap();
        let mut args = loaded(dir.path());

        // Act
        args.modify_rw_config("addresstype", "legacy", true);

        // Assert
        let settings = args.file().read_settings().unwrap();
        assert_eq!(settings.get("wallet"), Some(&serde_json::json!(["hot"])));
        assert_eq!(settings.get("addresstype"), Some(&Value::from("legacy")));
    }

    #[test]
    fn test_erase_rw_config_removes_file_and_managed_keys() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut args = loaded(dir.path());
        args.modify_rw_config("prune", "550", true);

        // Act
        args.erase_rw_config();

        // Assert
        assert!(!dir.path().join(RW_CONFIG_FILE_NAME).exists());
        assert!(!args.file().read_settings().unwrap().contains_key("prune"));
        assert!(!args.is_arg_set("-prune"));
    }

    #[test]
    fn test_settings_json_lives_in_chain_directory() {
        let file = RwConfigFile::for_data_dir(Path::new("/data"), Chain::Signet);
        assert_eq!(file.rw_path(), Path::new("/data/bitcoin_rw.conf"));
        assert_eq!(file.settings_path(), Path::new("/data/signet/settings.json"));
    }

    #[test]
    fn test_read_config_file_applies_chain_sections() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bitcoin.conf");
        std::fs::write(&path, "dbcache=300\n[test]\nport=18555\n").unwrap();

        // Act
        let main = read_config_file(&path, Chain::Main).unwrap();
        let test = read_config_file(&path, Chain::Test).unwrap();

        // Assert
        assert_eq!(main.len(), 1);
        assert_eq!(test.len(), 2);
    }
}
