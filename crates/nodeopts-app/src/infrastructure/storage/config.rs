//! TOML-based configuration for the `nodeopts` tool itself.
//!
//! Read from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\NodeOpts\config.toml`
//! - Linux:    `~/.config/nodeopts/config.toml`
//! - macOS:    `~/Library/Application Support/NodeOpts/config.toml`
//!
//! ```toml
//! [general]
//! log_level = "info"
//!
//! [settings]
//! organization = "Bitcoin"
//! application = "Bitcoin-Qt"
//!
//! [node]
//! chain = "main"
//! data_dir = "/srv/bitcoin"
//! gui_executable = "/usr/bin/bitcoin-qt"
//! ```
//!
//! Every field has a serde default, so a missing file or a file written by
//! an older version still loads.

use std::path::{Path, PathBuf};

use nodeopts_core::Chain;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level tool configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub node: NodeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Identity of the settings store the options dialog writes to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsConfig {
    #[serde(default = "default_organization")]
    pub organization: String,
    /// Base application name; non-main chains append `-<chain>`.
    #[serde(default = "default_application")]
    pub application: String,
}

/// Where the node lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeConfig {
    /// `main`, `test`, `signet` or `regtest`.
    #[serde(default = "default_chain")]
    pub chain: String,
    /// Base data directory; the platform default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Node config file name, relative to the base data directory.
    #[serde(default = "default_conf_file")]
    pub conf_file: String,
    /// GUI executable registered for start at login.
    #[serde(default = "default_gui_executable")]
    pub gui_executable: PathBuf,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_organization() -> String {
    "Bitcoin".to_string()
}
fn default_application() -> String {
    "Bitcoin-Qt".to_string()
}
fn default_chain() -> String {
    Chain::Main.as_str().to_string()
}
fn default_conf_file() -> String {
    "bitcoin.conf".to_string()
}
fn default_gui_executable() -> PathBuf {
    PathBuf::from("bitcoin-qt")
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            organization: default_organization(),
            application: default_application(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            chain: default_chain(),
            data_dir: None,
            conf_file: default_conf_file(),
            gui_executable: default_gui_executable(),
        }
    }
}

impl SettingsConfig {
    /// Store application name for `chain`: each chain keeps separate
    /// settings.
    pub fn application_for(&self, chain: Chain) -> String {
        match chain {
            Chain::Main => self.application.clone(),
            other => format!("{}-{}", self.application, other.as_str()),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Loads `AppConfig` from the platform config file.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Resolves the platform's per-user config base directory, shared by every
/// application (`~/.config` on Linux).
pub fn platform_config_base() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

/// Resolves the `nodeopts` config directory.
fn platform_config_dir() -> Option<PathBuf> {
    let base = platform_config_base()?;
    if cfg!(target_os = "linux") {
        Some(base.join("nodeopts"))
    } else {
        Some(base.join("NodeOpts"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
