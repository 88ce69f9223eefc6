//! Node port: live state owned by the running node.
//!
//! The options model never caches anything answered here.  Thread-safety of
//! the node's own subsystems is the node's responsibility.

use std::path::PathBuf;

use nodeopts_core::{Chain, OutputType};

/// Compact block filter index types the node can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFilterType {
    Basic,
}

#[cfg_attr(test, mockall::automock)]
pub trait NodeInterface {
    /// Chain the node was started on.
    fn chain(&self) -> Chain;

    /// Chain-specific data directory (where the settings backup goes).
    fn data_dir(&self) -> PathBuf;

    /// Current outbound traffic cap in bytes per cycle, `0` for unlimited.
    fn max_outbound_target(&self) -> u64;

    fn set_max_outbound_target(&mut self, bytes: u64);

    /// Starts or stops UPnP port mapping.
    fn map_port(&mut self, enable: bool);

    /// Changes the default address type of every loaded wallet.
    fn set_wallets_default_address_type(&mut self, output_type: OutputType);

    /// Whether an index of `filter_type` exists (built or building).
    fn has_block_filter_index(&self, filter_type: BlockFilterType) -> bool;
}
