//! Domain entities for NodeOpts.
//!
//! Pure data types with no infrastructure dependencies.  The settings model
//! in `nodeopts-app` is built on top of these; storage backends only ever see
//! [`value::SettingValue`] and the key names produced by
//! [`options::SettingKey::name`].

pub mod chain;
pub mod options;
pub mod output_type;
pub mod proxy;
pub mod prune;
pub mod units;
pub mod value;
