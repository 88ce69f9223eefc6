//! In-memory layered argument table.
//!
//! Lookup walks the layers from highest to lowest priority:
//!
//! ```text
//! forced  >  command line  >  config file  >  RW settings  >  soft  >  (caller default)
//! ```
//!
//! - *forced*: values this component manages exclusively (`force_set_arg`).
//! - *command line* / *config file*: supplied by the user, read-only here.
//! - *RW settings*: values persisted by this component into the node's RW
//!   config, either loaded at startup or written live.
//! - *soft*: values this component soft-set during this session.
//!
//! A soft-set is blocked only when a layer above *soft* holds a different
//! value; re-soft-setting a value this component itself soft-set earlier
//! just replaces it.

use std::collections::BTreeMap;

use tracing::debug;

use super::{normalize, RuntimeArgs, SoftSet};

/// Which layer an effective value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSource {
    Forced,
    CommandLine,
    ConfigFile,
    RwConfig,
    Soft,
}

/// Layered runtime argument table.
#[derive(Debug, Clone, Default)]
pub struct ArgsTable {
    forced: BTreeMap<String, String>,
    command_line: BTreeMap<String, String>,
    config_file: BTreeMap<String, String>,
    rw_settings: BTreeMap<String, String>,
    soft: BTreeMap<String, String>,
    /// Entries of the RW config file, in file order.
    rw_config: Vec<(String, String)>,
    rw_had_prune: bool,
}

impl ArgsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a command-line argument (`-name=value`).
    pub fn set_command_line(&mut self, name: &str, value: &str) {
        self.command_line
            .insert(normalize(name).to_string(), value.to_string());
    }

    /// Records an argument read from the node's own config file.
    pub fn set_config_file(&mut self, name: &str, value: &str) {
        self.config_file
            .insert(normalize(name).to_string(), value.to_string());
    }

    /// Loads the RW config as read from disk at startup.
    ///
    /// Every entry becomes a live setting, and the presence of `prune` is
    /// remembered for [`RuntimeArgs::rw_config_has_prune_option`].
    pub fn load_rw_config<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in entries {
            let name = normalize(name.as_ref()).to_string();
            let value = value.as_ref().to_string();
            if name == "prune" {
                self.rw_had_prune = true;
            }
            self.rw_settings.insert(name.clone(), value.clone());
            self.upsert_rw_entry(name, value);
        }
    }

    /// Entries of the RW config file, in file order.
    pub fn rw_config_entries(&self) -> &[(String, String)] {
        &self.rw_config
    }

    /// Looks up the RW config file entry for `name`.
    pub fn rw_config_value(&self, name: &str) -> Option<&str> {
        let name = normalize(name);
        self.rw_config
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Values written to the node's live settings (`settings.json`).
    pub fn rw_settings(&self) -> &BTreeMap<String, String> {
        &self.rw_settings
    }

    /// The layer the effective value of `name` comes from.
    pub fn source(&self, name: &str) -> Option<ArgSource> {
        self.lookup(normalize(name)).map(|(source, _)| source)
    }

    fn lookup(&self, name: &str) -> Option<(ArgSource, &String)> {
        [
            (ArgSource::Forced, &self.forced),
            (ArgSource::CommandLine, &self.command_line),
            (ArgSource::ConfigFile, &self.config_file),
            (ArgSource::RwConfig, &self.rw_settings),
            (ArgSource::Soft, &self.soft),
        ]
        .into_iter()
        .find_map(|(source, layer)| layer.get(name).map(|v| (source, v)))
    }

    fn upsert_rw_entry(&mut self, name: String, value: String) {
        match self.rw_config.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.rw_config.push((name, value)),
        }
    }
}

impl RuntimeArgs for ArgsTable {
    fn arg(&self, name: &str) -> Option<String> {
        self.lookup(normalize(name)).map(|(_, v)| v.clone())
    }

    fn is_externally_set(&self, name: &str) -> bool {
        let name = normalize(name);
        self.command_line.contains_key(name) || self.config_file.contains_key(name)
    }

    fn soft_set_arg(&mut self, name: &str, value: &str) -> SoftSet {
        let name = normalize(name);
        let blocking = match self.lookup(name) {
            Some((ArgSource::Soft, _)) | None => None,
            Some((_, current)) if current == value => return SoftSet::Applied,
            Some((source, current)) => Some((source, current.clone())),
        };
        match blocking {
            None => {
                self.soft.insert(name.to_string(), value.to_string());
                SoftSet::Applied
            }
            Some((source, effective)) => {
                debug!("soft-set of -{name}={value} blocked by {source:?} value {effective:?}");
                SoftSet::Overridden { effective }
            }
        }
    }

    fn force_set_arg(&mut self, name: &str, value: &str) {
        self.forced
            .insert(normalize(name).to_string(), value.to_string());
    }

    fn modify_rw_config(&mut self, name: &str, value: &str, also_settings_json: bool) {
        let name = normalize(name).to_string();
        if also_settings_json {
            self.rw_settings.insert(name.clone(), value.to_string());
        }
        self.upsert_rw_entry(name, value.to_string());
    }

    fn erase_rw_config(&mut self) {
        self.rw_config.clear();
        self.rw_settings.clear();
    }

    fn rw_config_has_prune_option(&self) -> bool {
        self.rw_had_prune
    }

    fn rw_config_entry(&self, name: &str) -> Option<String> {
        self.rw_config_value(name).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_beats_config_file() {
        // Arrange
        let mut args = ArgsTable::new();
        args.set_config_file("dbcache", "300");
        args.set_command_line("-dbcache", "1000");

        // Act / Assert
        assert_eq!(args.get_arg("-dbcache", ""), "1000");
        assert_eq!(args.source("dbcache"), Some(ArgSource::CommandLine));
    }

    #[test]
    fn test_soft_set_applies_when_unset() {
        let mut args = ArgsTable::new();
        assert_eq!(args.soft_set_arg("-par", "4"), SoftSet::Applied);
        assert_eq!(args.get_int_arg("-par", 0), 4);
        assert!(!args.is_externally_set("-par"));
    }

    #[test]
    fn test_soft_set_blocked_by_command_line_reports_effective_value() {
        // Arrange
        let mut args = ArgsTable::new();
        args.set_command_line("-port", "9999");

        // Act
        let outcome = args.soft_set_arg("-port", "8333");

        // Assert
        assert_eq!(
            outcome,
            SoftSet::Overridden {
                effective: "9999".to_string()
            }
        );
        assert_eq!(args.get_arg("-port", ""), "9999");
    }

    #[test]
    fn test_soft_set_of_identical_external_value_is_applied() {
        let mut args = ArgsTable::new();
        args.set_command_line("-listen", "1");
        assert!(args.soft_set_bool_arg("-listen", true).is_applied());
    }

    #[test]
    fn test_repeated_soft_set_replaces_own_value() {
        let mut args = ArgsTable::new();
        args.soft_set_arg("-lang", "de");
        assert!(args.soft_set_arg("-lang", "fr").is_applied());
        assert_eq!(args.get_arg("-lang", ""), "fr");
    }

    #[test]
    fn test_force_set_overrides_command_line() {
        let mut args = ArgsTable::new();
        args.set_command_line("-prune", "0");
        args.force_set_arg("-prune", "550");
        assert_eq!(args.get_int_arg("-prune", 0), 550);
        assert!(args.is_externally_set("-prune"));
    }

    #[test]
    fn test_modify_rw_config_without_settings_json_is_not_live() {
        // Arrange
        let mut args = ArgsTable::new();

        // Act
        args.modify_rw_config("peercfilters", "1", false);

        // Assert
        assert!(!args.is_arg_set("peercfilters"));
        assert_eq!(args.rw_config_value("peercfilters"), Some("1"));
    }

    #[test]
    fn test_modify_rw_config_rewrites_existing_entry_in_place() {
        let mut args = ArgsTable::new();
        args.load_rw_config([("prune", "550"), ("maxuploadtarget", "100")]);
        args.modify_rw_config("prune", "1000", true);

        assert_eq!(
            args.rw_config_entries(),
            &[
                ("prune".to_string(), "1000".to_string()),
                ("maxuploadtarget".to_string(), "100".to_string()),
            ]
        );
        assert_eq!(args.get_int_arg("prune", 0), 1000);
    }

    #[test]
    fn test_erase_rw_config_keeps_prune_flag_from_load() {
        // Arrange
        let mut args = ArgsTable::new();
        args.load_rw_config([("prune", "550")]);

        // Act
        args.erase_rw_config();

        // Assert
        assert!(args.rw_config_entries().is_empty());
        assert!(!args.is_arg_set("prune"));
        assert!(args.rw_config_has_prune_option());
    }

    #[test]
    fn test_rw_value_blocks_conflicting_soft_set() {
        let mut args = ArgsTable::new();
        args.load_rw_config([("prune", "550")]);
        assert!(!args.soft_set_arg("prune", "0").is_applied());
    }
}
