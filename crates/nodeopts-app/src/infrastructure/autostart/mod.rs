//! Start-at-login registration.
//!
//! - Linux: an XDG autostart `.desktop` entry under
//!   `$XDG_CONFIG_HOME/autostart` (or `~/.config/autostart`).
//! - Elsewhere: [`NoAutostart`], which reports "disabled" and refuses to
//!   enable.
//!
//! [`platform_registrar`] picks the right one for the current build.

use std::path::{Path, PathBuf};

use nodeopts_core::Chain;
use tracing::{debug, info};

use crate::application::startup::{AutostartError, StartupRegistrar};
use crate::infrastructure::storage::config::platform_config_base;

pub mod mock;

/// Name of the autostart entry for `chain`.
pub fn desktop_file_name(chain: Chain) -> String {
    match chain {
        Chain::Main => "bitcoin.desktop".to_string(),
        other => format!("bitcoin-{}.desktop", other.as_str()),
    }
}

/// XDG autostart entry for the GUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdgAutostart {
    entry_path: PathBuf,
    exec: PathBuf,
    chain: Chain,
}

impl XdgAutostart {
    /// Entry at `entry_path` launching `exec` on `chain`.
    pub fn new(entry_path: impl Into<PathBuf>, exec: impl Into<PathBuf>, chain: Chain) -> Self {
        Self {
            entry_path: entry_path.into(),
            exec: exec.into(),
            chain,
        }
    }

    /// The per-user entry for `chain`, launching `exec`.
    ///
    /// # Errors
    ///
    /// Returns [`AutostartError::NoAutostartDir`] when neither
    /// `XDG_CONFIG_HOME` nor `HOME` is set.
    pub fn for_user(exec: impl Into<PathBuf>, chain: Chain) -> Result<Self, AutostartError> {
        let base = platform_config_base().ok_or(AutostartError::NoAutostartDir)?;
        Ok(Self::new(
            base.join("autostart").join(desktop_file_name(chain)),
            exec,
            chain,
        ))
    }

    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    fn render_entry(&self) -> String {
        let name = match self.chain {
            Chain::Main => "Bitcoin".to_string(),
            other => format!("Bitcoin ({})", other.as_str()),
        };
        let mut exec = format!("\"{}\" -min", self.exec.display());
        if self.chain != Chain::Main {
            exec.push_str(&format!(" -chain={}", self.chain.as_str()));
        }
        format!(
            "[Desktop Entry]\nType=Application\nName={name}\nExec={exec}\nTerminal=false\nHidden=false\n"
        )
    }
}

impl StartupRegistrar for XdgAutostart {
    fn is_enabled(&self) -> bool {
        let Ok(content) = std::fs::read_to_string(&self.entry_path) else {
            return false;
        };
        // An entry the user hid in their session settings does not count.
        !content.lines().any(|line| {
            line.trim_start().starts_with("Hidden") && line.contains("true")
        })
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), AutostartError> {
        if !enabled {
            return match std::fs::remove_file(&self.entry_path) {
                Ok(()) => {
                    info!(path = %self.entry_path.display(), "removed autostart entry");
                    Ok(())
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(source) => Err(AutostartError::Io {
                    path: self.entry_path.clone(),
                    source,
                }),
            };
        }
        if let Some(dir) = self.entry_path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| AutostartError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.entry_path, self.render_entry()).map_err(|source| {
            AutostartError::Io {
                path: self.entry_path.clone(),
                source,
            }
        })?;
        info!(path = %self.entry_path.display(), "wrote autostart entry");
        Ok(())
    }
}

/// Registrar for platforms without a supported mechanism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoAutostart;

impl StartupRegistrar for NoAutostart {
    fn is_enabled(&self) -> bool {
        false
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), AutostartError> {
        if enabled {
            Err(AutostartError::Unsupported(std::env::consts::OS.to_string()))
        } else {
            Ok(())
        }
    }
}

/// The registrar for the current platform, launching `exec` on `chain`.
pub fn platform_registrar(exec: PathBuf, chain: Chain) -> Box<dyn StartupRegistrar> {
    if cfg!(target_os = "linux") {
        match XdgAutostart::for_user(exec, chain) {
            Ok(registrar) => return Box::new(registrar),
            Err(e) => debug!(error = %e, "start at login unavailable"),
        }
    }
    Box::new(NoAutostart)
}
