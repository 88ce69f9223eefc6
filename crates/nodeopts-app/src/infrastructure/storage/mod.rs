//! Storage infrastructure: settings store backends and app configuration.
//!
//! - `toml_file` persists the options dialog's settings to a per-application
//!   TOML file, re-read on every access.
//! - `memory` keeps them in a map, for tests and dry runs.
//! - `backup` renders any store into the INI backup written on reset.
//! - `config` loads the `nodeopts` tool's own configuration.

pub mod backup;
pub mod config;
pub mod memory;
pub mod toml_file;
