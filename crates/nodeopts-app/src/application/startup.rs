//! "Start at login" port.
//!
//! This is the one option whose write can genuinely fail: the OS may refuse
//! to register the application.  Failures surface as `false` from
//! `set_data`.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for start-at-login registration.
#[derive(Debug, Error)]
pub enum AutostartError {
    /// The user's home/config directory could not be determined.
    #[error("could not determine the autostart directory")]
    NoAutostartDir,

    /// Writing or removing the registration failed.
    #[error("I/O error accessing autostart entry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The current platform has no supported registration mechanism.
    #[error("start at login is not supported on {0}")]
    Unsupported(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait StartupRegistrar {
    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool) -> Result<(), AutostartError>;
}
