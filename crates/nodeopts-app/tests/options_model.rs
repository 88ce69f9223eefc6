//! Behaviour of the options model over in-memory backends.

use std::sync::mpsc::Receiver;

use nodeopts_app::application::events::OptionsEvent;
use nodeopts_app::application::options_model::{OptionsBackends, OptionsModel};
use nodeopts_app::application::startup::StartupRegistrar;
use nodeopts_app::infrastructure::autostart::mock::MemoryAutostart;
use nodeopts_app::infrastructure::node::mock::{NodeCall, RecordingNode};
use nodeopts_app::infrastructure::storage::memory::MemoryStore;
use nodeopts_core::{ArgsTable, Chain, OptionId, OutputType, SettingValue};

struct Harness {
    model: OptionsModel,
    events: Receiver<OptionsEvent>,
    node: RecordingNode,
    startup: MemoryAutostart,
    _data_dir: tempfile::TempDir,
}

fn harness(
    store: MemoryStore,
    args: ArgsTable,
    node_setup: fn(RecordingNode) -> RecordingNode,
) -> Harness {
    let data_dir = tempfile::tempdir().unwrap();
    let node = node_setup(RecordingNode::new(Chain::Main, data_dir.path()));
    let startup = MemoryAutostart::new(false);
    let backends = OptionsBackends {
        store: Box::new(store),
        args: Box::new(args),
        node: Box::new(node.clone()),
        startup: Box::new(startup.clone()),
    };
    let (model, events) = OptionsModel::new(backends, "/home/user/.bitcoin", false);
    Harness {
        model,
        events,
        node,
        startup,
        _data_dir: data_dir,
    }
}

fn default_harness() -> Harness {
    harness(MemoryStore::new(), ArgsTable::new(), |n| n)
}

fn drain(events: &Receiver<OptionsEvent>) -> Vec<OptionsEvent> {
    events.try_iter().collect()
}

#[test]
fn test_reinit_keeps_customized_values() {
    // Arrange
    let mut h = default_harness();
    h.model
        .set_option(OptionId::ThreadsScriptVerif, SettingValue::Int(4));
    h.model
        .set_option(OptionId::ThirdPartyTxUrls, SettingValue::from("https://example.org/tx/%s"));

    // Act
    h.model.init(false);

    // Assert
    assert_eq!(h.model.option(OptionId::ThreadsScriptVerif), SettingValue::Int(4));
    assert_eq!(h.model.third_party_tx_urls(), "https://example.org/tx/%s");
    assert!(!h.model.is_restart_required());
}

#[test]
fn test_every_row_is_readable_and_out_of_range_is_none() {
    let h = default_harness();
    for row in 0..h.model.row_count() {
        assert!(h.model.data(row).is_some(), "row {row} unreadable");
    }
    assert!(h.model.data(h.model.row_count()).is_none());
}

#[test]
fn test_set_prune_mib_zero_disables_pruning() {
    // Arrange
    let mut h = default_harness();

    // Act
    h.model.set_prune_mib(0, false);

    // Assert
    assert_eq!(h.model.store().get("bPrune"), Some(SettingValue::Bool(false)));
    assert!(!h.model.store().contains("nPruneSize"));
    assert_eq!(h.model.args().get_arg("-prune", ""), "0");
    assert_eq!(h.model.overridden_by_command_line(), "");
}

#[test]
fn test_unchanged_write_does_not_touch_restart_flag_or_overrides() {
    // Arrange
    let mut args = ArgsTable::new();
    args.set_command_line("-listen", "0");
    let mut h = harness(MemoryStore::new(), args, |n| n);
    let overridden = h.model.overridden_by_command_line().to_string();
    drain(&h.events);

    // Act
    for id in OptionId::ALL {
        let current = h.model.option(id);
        assert!(h.model.set_option(id, current));
    }

    // Assert
    assert!(!h.model.is_restart_required());
    assert_eq!(h.model.overridden_by_command_line(), overridden);
    assert!(drain(&h.events).is_empty());
}

#[test]
fn test_live_rows_reach_the_node() {
    // Arrange
    let mut h = default_harness();

    // Act
    h.model.set_option(OptionId::MapPortUpnp, SettingValue::Bool(true));
    h.model.set_option(OptionId::MaxUploadTarget, SettingValue::Int(144));
    h.model
        .set_option(OptionId::AddressType, SettingValue::from("p2sh-segwit"));

    // Assert
    assert_eq!(
        h.node.calls(),
        vec![
            NodeCall::MapPort(true),
            NodeCall::SetMaxOutboundTarget(144 * 1024 * 1024),
            NodeCall::SetWalletsDefaultAddressType(OutputType::P2shSegwit),
        ]
    );
    assert_eq!(h.model.option(OptionId::MaxUploadTarget), SettingValue::Int(144));
    assert!(!h.model.is_restart_required());
}

#[test]
fn test_block_filter_propagation_forces_basic_index_once() {
    // Arrange
    let mut h = default_harness();

    // Act
    h.model
        .set_option(OptionId::PeerBlockFilters, SettingValue::Bool(true));
    let restart_after_first = h.model.is_restart_required();
    drain(&h.events);
    h.model
        .set_option(OptionId::PeerBlockFilters, SettingValue::Bool(true));

    // Assert
    assert!(restart_after_first);
    assert_eq!(h.model.args().get_arg("-blockfilterindex", ""), "basic");
    assert!(drain(&h.events).is_empty());
}

#[test]
fn test_block_filter_propagation_with_built_index_needs_no_restart() {
    // Arrange
    let mut h = harness(MemoryStore::new(), ArgsTable::new(), |n| {
        n.with_basic_filter_index()
    });

    // Act
    h.model
        .set_option(OptionId::PeerBlockFilters, SettingValue::Bool(true));

    // Assert
    assert!(!h.model.is_restart_required());
    assert!(!h.model.args().is_arg_set("-blockfilterindex"));
    assert_eq!(h.model.option(OptionId::PeerBlockFilters), SettingValue::Bool(true));
}

#[test]
fn test_bloom_filter_toggle_needs_restart() {
    // Arrange
    let mut h = default_harness();

    // Act
    h.model
        .set_option(OptionId::PeerBloomFilters, SettingValue::Bool(true));

    // Assert
    assert_eq!(h.model.option(OptionId::PeerBloomFilters), SettingValue::Bool(true));
    assert!(h.model.is_restart_required());
}

#[test]
fn test_reset_preserves_data_dir_and_disables_autostart() {
    // Arrange
    let store = MemoryStore::with_entries([
        ("strDataDir", SettingValue::from("/mnt/chain")),
        ("fMinimizeOnClose", SettingValue::Bool(true)),
    ]);
    let mut h = harness(store, ArgsTable::new(), |n| n);
    h.model
        .set_option(OptionId::StartAtStartup, SettingValue::Bool(true));
    assert!(h.startup.is_enabled());

    // Act
    h.model.init(true);

    // Assert
    assert_eq!(h.model.store().get("strDataDir"), Some(SettingValue::from("/mnt/chain")));
    assert_eq!(h.model.store().get("fReset"), Some(SettingValue::Bool(true)));
    assert!(!h.model.minimize_on_close());
    assert!(!h.startup.is_enabled());
    assert_eq!(h.model.option(OptionId::StartAtStartup), SettingValue::Bool(false));
}

#[test]
fn test_start_at_startup_failure_returns_false() {
    // Arrange
    let data_dir = tempfile::tempdir().unwrap();
    let backends = OptionsBackends {
        store: Box::new(MemoryStore::new()),
        args: Box::new(ArgsTable::new()),
        node: Box::new(RecordingNode::new(Chain::Main, data_dir.path())),
        startup: Box::new(MemoryAutostart::refusing()),
    };
    let (mut model, _events) = OptionsModel::new(backends, "/home/user/.bitcoin", false);

    // Act / Assert
    assert!(!model.set_option(OptionId::StartAtStartup, SettingValue::Bool(true)));
    assert!(model.set_data(999, SettingValue::Bool(true)));
}

#[test]
fn test_hide_tray_icon_emits_dedicated_event_then_data_changed() {
    // Arrange
    let mut h = default_harness();
    drain(&h.events);

    // Act
    h.model.set_data(OptionId::HideTrayIcon.row(), SettingValue::Bool(true));

    // Assert
    assert_eq!(
        drain(&h.events),
        vec![
            OptionsEvent::HideTrayIconChanged(true),
            OptionsEvent::DataChanged(OptionId::HideTrayIcon),
        ]
    );
}
