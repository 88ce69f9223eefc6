//! # nodeopts-core
//!
//! Shared domain types for the NodeOpts settings adapter: the option
//! catalogue addressed by the configuration dialog, typed setting values,
//! proxy address parsing, display units, address output types, prune unit
//! conversion, chain parameters and the layered runtime-argument table.
//!
//! This crate has zero dependencies on OS APIs, file systems or UI
//! frameworks.  Everything here is pure data and can be tested anywhere.
//!
//! # Architecture overview
//!
//! NodeOpts sits between a graphical options dialog and two stores:
//!
//! - a persistent key-value **settings store** (the desktop settings
//!   registry), and
//! - the node's **runtime argument table**, which is populated from the
//!   command line and config files before the dialog ever runs.
//!
//! This crate defines the vocabulary both sides share:
//!
//! - **`domain`** – option rows, persisted setting keys, value types and the
//!   small parsers/formatters that go with them.
//! - **`args`** – the [`RuntimeArgs`] capability trait and the in-memory
//!   [`ArgsTable`] that resolves a value across its precedence layers.

pub mod args;
pub mod domain;

pub use args::table::{ArgSource, ArgsTable};
pub use args::{RuntimeArgs, SoftSet};
pub use domain::chain::Chain;
pub use domain::options::{Forward, InitEntry, OptionId, SettingDefaults, SettingKey, ValueKind};
pub use domain::output_type::OutputType;
pub use domain::proxy::ProxySetting;
pub use domain::units::DisplayUnit;
pub use domain::value::{ParseError, SettingValue};
