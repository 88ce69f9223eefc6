//! Node-side adapters.
//!
//! - `rwconf` persists the RW config (`bitcoin_rw.conf`) and the node's live
//!   `settings.json`, and wraps an [`ArgsTable`](nodeopts_core::ArgsTable) so
//!   every RW change reaches disk.
//! - `offline` answers node queries from the argument table when no node
//!   process is attached.
//! - `mock` is a recording fake for integration tests.

use std::path::{Path, PathBuf};

use nodeopts_core::Chain;

pub mod mock;
pub mod offline;
pub mod rwconf;

/// Platform default base data directory of the node.
///
/// - Windows: `%APPDATA%\Bitcoin`
/// - Linux:   `~/.bitcoin`
/// - macOS:   `~/Library/Application Support/Bitcoin`
pub fn default_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Bitcoin"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Bitcoin")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".bitcoin"))
    }
}

/// Chain-specific data directory under `base`.
pub fn chain_data_dir(base: &Path, chain: Chain) -> PathBuf {
    match chain.data_subdir() {
        "" => base.to_path_buf(),
        subdir => base.join(subdir),
    }
}
