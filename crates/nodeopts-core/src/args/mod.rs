//! The node's runtime argument table, seen from the settings model.
//!
//! The node populates its arguments from the command line and config files
//! long before the options dialog exists.  The settings model may then:
//!
//! - **soft-set** a value, which only takes effect if nothing with higher
//!   priority already supplied a different one ([`SoftSet`] reports which);
//! - **force-set** a value it exclusively manages (e.g. `-prune` derived from
//!   a stored setting);
//! - **modify the RW config**, the rewritable part of the node's on-disk
//!   configuration that survives restarts independently of the settings
//!   store.
//!
//! [`RuntimeArgs`] is the capability trait; [`table::ArgsTable`] is the
//! in-memory layered resolver behind it.  Persisting the RW config to disk
//! is an infrastructure concern handled in `nodeopts-app`.

pub mod conf;
pub mod table;

/// Outcome of a soft-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoftSet {
    /// The value is now in effect.
    Applied,
    /// A higher-priority source holds a different value, which stays in
    /// effect.
    Overridden {
        /// The value that remains in effect.
        effective: String,
    },
}

impl SoftSet {
    pub fn is_applied(&self) -> bool {
        matches!(self, SoftSet::Applied)
    }
}

/// Strips the leading dash so `-prune` and `prune` address the same argument.
pub fn normalize(name: &str) -> &str {
    name.trim_start_matches('-')
}

/// Interprets an argument string as a bool: an empty value (`-listen`) is
/// `true`, otherwise the leading integer decides.
pub fn interpret_bool(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    parse_leading_int(value) != 0
}

/// Parses the leading base-10 integer of `value`, `0` when there is none.
pub fn parse_leading_int(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().unwrap_or(0)
}

/// Capability to read and steer the node's runtime arguments.
///
/// Names may be given with or without the leading dash.
pub trait RuntimeArgs {
    /// Current effective value of `name`, if any source set it.
    fn arg(&self, name: &str) -> Option<String>;

    /// Whether `name` was supplied by the user outside this component
    /// (command line or config file).
    fn is_externally_set(&self, name: &str) -> bool;

    /// Sets `name` unless a higher-priority source holds a different value.
    fn soft_set_arg(&mut self, name: &str, value: &str) -> SoftSet;

    /// Sets `name` unconditionally, above every other source.
    fn force_set_arg(&mut self, name: &str, value: &str);

    /// Durably rewrites `name` in the node's RW config.  With
    /// `also_settings_json` the value also becomes the node's live setting.
    fn modify_rw_config(&mut self, name: &str, value: &str, also_settings_json: bool);

    /// Deletes the RW config and every value it contributed.
    fn erase_rw_config(&mut self);

    /// Whether the RW config contained a `prune` entry when it was loaded.
    fn rw_config_has_prune_option(&self) -> bool;

    /// Value the RW config currently holds for `name`.
    fn rw_config_entry(&self, name: &str) -> Option<String>;

    fn is_arg_set(&self, name: &str) -> bool {
        self.arg(name).is_some()
    }

    fn get_arg(&self, name: &str, default: &str) -> String {
        self.arg(name).unwrap_or_else(|| default.to_string())
    }

    fn get_int_arg(&self, name: &str, default: i64) -> i64 {
        self.arg(name).map_or(default, |v| parse_leading_int(&v))
    }

    fn get_bool_arg(&self, name: &str, default: bool) -> bool {
        self.arg(name).map_or(default, |v| interpret_bool(&v))
    }

    fn soft_set_bool_arg(&mut self, name: &str, value: bool) -> SoftSet {
        self.soft_set_arg(name, if value { "1" } else { "0" })
    }
}
