//! Node adapter used when no node process is attached.
//!
//! The `nodeopts` binary edits settings while the node is stopped.  Queries
//! are answered from the runtime arguments captured at construction; live
//! mutations are recorded and logged, and take effect through the RW config
//! when the node next starts.

use std::path::{Path, PathBuf};

use nodeopts_core::{Chain, OutputType, RuntimeArgs};
use tracing::info;

use super::chain_data_dir;
use crate::application::node::{BlockFilterType, NodeInterface};

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineNode {
    chain: Chain,
    data_dir: PathBuf,
    max_outbound_target: u64,
    map_port: bool,
    address_type: OutputType,
    basic_filter_index: bool,
}

impl OfflineNode {
    /// Snapshots the node state implied by `args` for `chain` under the base
    /// data directory `base_data_dir`.
    pub fn from_args(chain: Chain, base_data_dir: &Path, args: &dyn RuntimeArgs) -> Self {
        let upload_mib = u64::try_from(args.get_int_arg("-maxuploadtarget", 0)).unwrap_or(0);
        Self {
            chain,
            data_dir: chain_data_dir(base_data_dir, chain),
            max_outbound_target: upload_mib.saturating_mul(MIB),
            map_port: args.get_bool_arg("-upnp", false),
            address_type: OutputType::parse_or_default(&args.get_arg("-addresstype", "")),
            basic_filter_index: matches!(
                args.get_arg("-blockfilterindex", "0").as_str(),
                "1" | "basic"
            ),
        }
    }

    pub fn map_port_enabled(&self) -> bool {
        self.map_port
    }

    pub fn address_type(&self) -> OutputType {
        self.address_type
    }
}

impl NodeInterface for OfflineNode {
    fn chain(&self) -> Chain {
        self.chain
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn max_outbound_target(&self) -> u64 {
        self.max_outbound_target
    }

    fn set_max_outbound_target(&mut self, bytes: u64) {
        info!(bytes, "upload target recorded; applies when the node starts");
        self.max_outbound_target = bytes;
    }

    fn map_port(&mut self, enable: bool) {
        info!(enable, "port mapping recorded; applies when the node starts");
        self.map_port = enable;
    }

    fn set_wallets_default_address_type(&mut self, output_type: OutputType) {
        info!(%output_type, "default address type recorded; applies when wallets load");
        self.address_type = output_type;
    }

    fn has_block_filter_index(&self, filter_type: BlockFilterType) -> bool {
        match filter_type {
            BlockFilterType::Basic => self.basic_filter_index,
        }
    }
}
