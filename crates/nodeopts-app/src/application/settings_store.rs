//! Persistent settings store port.
//!
//! The store is a flat key-value registry keyed by application identity.
//! Implementations are expected to open their backing storage fresh on every
//! call rather than caching a handle; the model never holds a store
//! transaction open across operations.

use std::path::{Path, PathBuf};

use nodeopts_core::SettingValue;
use thiserror::Error;

/// Error type for settings store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored content could not be parsed or rendered.
    #[error("malformed settings file {path}: {message}")]
    Format { path: PathBuf, message: String },
}

/// Key-value settings registry.
pub trait SettingsStore {
    /// Reads `key`; unreadable storage reads as absent.
    fn get(&self, key: &str) -> Option<SettingValue>;

    fn set(&mut self, key: &str, value: SettingValue) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Every key currently stored, in sorted order.
    fn keys(&self) -> Vec<String>;

    /// Removes every key.
    fn clear(&mut self) -> Result<(), StoreError>;

    /// Copies every key into an INI file at `path`, replacing it.
    fn backup(&self, path: &Path) -> Result<(), StoreError>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
