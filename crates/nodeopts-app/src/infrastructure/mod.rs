//! Infrastructure layer for the nodeopts application.
//!
//! Contains OS-facing adapters: settings store backends, the node's RW
//! config persistence, the offline node adapter, start-at-login
//! registration, and the command bridge used by the CLI.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `nodeopts_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod autostart;
pub mod node;
pub mod storage;
pub mod ui_bridge;
