//! Recording node fake for integration tests.
//!
//! The options model owns its node, so the fake shares its state through an
//! `Arc<Mutex<..>>`: clone the [`RecordingNode`] before handing it over and
//! inspect the clone afterwards.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use nodeopts_core::{Chain, OutputType};

use crate::application::node::{BlockFilterType, NodeInterface};

/// A live call made by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeCall {
    SetMaxOutboundTarget(u64),
    MapPort(bool),
    SetWalletsDefaultAddressType(OutputType),
}

#[derive(Debug, Default)]
struct NodeState {
    max_outbound_target: u64,
    basic_filter_index: bool,
    calls: Vec<NodeCall>,
}

#[derive(Debug, Clone)]
pub struct RecordingNode {
    chain: Chain,
    data_dir: PathBuf,
    state: Arc<Mutex<NodeState>>,
}

impl RecordingNode {
    pub fn new(chain: Chain, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            chain,
            data_dir: data_dir.into(),
            state: Arc::new(Mutex::new(NodeState::default())),
        }
    }

    /// Marks the basic block filter index as already built.
    pub fn with_basic_filter_index(self) -> Self {
        self.state.lock().expect("lock poisoned").basic_filter_index = true;
        self
    }

    /// Every live call received so far, in order.
    pub fn calls(&self) -> Vec<NodeCall> {
        self.state.lock().expect("lock poisoned").calls.clone()
    }
}

impl NodeInterface for RecordingNode {
    fn chain(&self) -> Chain {
        self.chain
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn max_outbound_target(&self) -> u64 {
        self.state.lock().expect("lock poisoned").max_outbound_target
    }

    fn set_max_outbound_target(&mut self, bytes: u64) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.max_outbound_target = bytes;
        state.calls.push(NodeCall::SetMaxOutboundTarget(bytes));
    }

    fn map_port(&mut self, enable: bool) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.calls.push(NodeCall::MapPort(enable));
    }

    fn set_wallets_default_address_type(&mut self, output_type: OutputType) {
        let mut state = self.state.lock().expect("lock poisoned");
        state
            .calls
            .push(NodeCall::SetWalletsDefaultAddressType(output_type));
    }

    fn has_block_filter_index(&self, filter_type: BlockFilterType) -> bool {
        match filter_type {
            BlockFilterType::Basic => self.state.lock().expect("lock poisoned").basic_filter_index,
        }
    }
}
