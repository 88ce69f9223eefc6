//! Application layer: the options model and the ports it depends on.
//!
//! The model orchestrates three collaborators it only knows through traits:
//!
//! - **`settings_store`** – the persistent key-value settings registry.
//! - **`node`** – live queries and mutations on the running node.
//! - **`startup`** – the OS "start at login" registration.
//!
//! The runtime-argument table comes from `nodeopts_core::RuntimeArgs`.
//!
//! Nothing here touches the file system or the OS directly; concrete
//! adapters live in `infrastructure`.

pub mod events;
pub mod node;
pub mod options_model;
pub mod settings_store;
pub mod startup;
