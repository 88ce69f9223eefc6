//! Settings survive a restart when backed by the on-disk store and RW config.

use std::path::Path;

use nodeopts_app::application::options_model::{OptionsBackends, OptionsModel, BACKUP_FILE_NAME};
use nodeopts_app::infrastructure::autostart::mock::MemoryAutostart;
use nodeopts_app::infrastructure::node::offline::OfflineNode;
use nodeopts_app::infrastructure::node::rwconf::{PersistentArgs, RwConfigFile};
use nodeopts_app::infrastructure::node::chain_data_dir;
use nodeopts_app::infrastructure::storage::toml_file::TomlFileStore;
use nodeopts_core::{ArgsTable, Chain, OptionId, OutputType, SettingValue};

/// Opens the options the way the binary does, with `table` holding the
/// command-line and config-file layers.
fn open_session(base: &Path, chain: Chain, table: ArgsTable) -> OptionsModel {
    let store = TomlFileStore::new(base.join("gui-settings.toml"));
    let args = PersistentArgs::load(table, RwConfigFile::for_data_dir(base, chain)).unwrap();
    let node = OfflineNode::from_args(chain, base, &args);
    let backends = OptionsBackends {
        store: Box::new(store),
        args: Box::new(args),
        node: Box::new(node),
        startup: Box::new(MemoryAutostart::new(false)),
    };
    OptionsModel::new(backends, base.display().to_string(), false).0
}

#[test]
fn test_prune_and_address_type_survive_restart() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut first = open_session(dir.path(), Chain::Main, ArgsTable::new());
    first.set_option(OptionId::PruneMib, SettingValue::Int(550));
    first.set_option(OptionId::AddressType, SettingValue::from("legacy"));
    first.set_option(OptionId::MaxUploadTarget, SettingValue::Int(500));
    assert!(first.is_restart_required());
    drop(first);

    // Act
    let second = open_session(dir.path(), Chain::Main, ArgsTable::new());

    // Assert
    assert_eq!(second.option(OptionId::PruneMib), SettingValue::Int(550));
    assert_eq!(
        second.option(OptionId::AddressType),
        SettingValue::from(OutputType::Legacy.as_str())
    );
    assert_eq!(second.option(OptionId::MaxUploadTarget), SettingValue::Int(500));
    assert_eq!(second.store().get("bPrune"), Some(SettingValue::Bool(true)));
    assert!(!second.is_restart_required());
}

#[test]
fn test_rw_config_and_settings_json_are_written() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut model = open_session(dir.path(), Chain::Main, ArgsTable::new());

    // Act
    model.set_option(OptionId::PeerBloomFilters, SettingValue::Bool(true));

    // Assert
    let file = RwConfigFile::for_data_dir(dir.path(), Chain::Main);
    let entries = file.read_entries().unwrap();
    assert!(entries.contains(&("peerbloomfilters".to_string(), "1".to_string())));
    let settings = file.read_settings().unwrap();
    assert!(settings.contains_key("peerbloomfilters"));
}

#[test]
fn test_config_file_value_overrides_stored_setting() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut first = open_session(dir.path(), Chain::Main, ArgsTable::new());
    first.set_option(OptionId::DatabaseCache, SettingValue::Int(1000));
    drop(first);
    let mut table = ArgsTable::new();
    table.set_config_file("-dbcache", "300");

    // Act
    let second = open_session(dir.path(), Chain::Main, table);

    // Assert
    assert_eq!(second.option(OptionId::DatabaseCache), SettingValue::Int(1000));
    assert_eq!(second.args().get_arg("-dbcache", ""), "300");
    assert!(second.overridden_by_command_line().contains("-dbcache=300"));
}

#[test]
fn test_reset_backs_up_and_keeps_prune_across_restart() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut first = open_session(dir.path(), Chain::Test, ArgsTable::new());
    first.set_option(OptionId::PruneMib, SettingValue::Int(2048));
    first.set_option(OptionId::ThreadsScriptVerif, SettingValue::Int(3));

    // Act
    first.init(true);
    drop(first);
    let second = open_session(dir.path(), Chain::Test, ArgsTable::new());

    // Assert
    let backup = chain_data_dir(dir.path(), Chain::Test).join(BACKUP_FILE_NAME);
    let text = std::fs::read_to_string(backup).unwrap();
    assert!(text.starts_with("[General]"));
    assert!(text.contains("nThreadsScriptVerif=3"));
    assert_eq!(second.option(OptionId::ThreadsScriptVerif), SettingValue::Int(0));
    assert_eq!(second.option(OptionId::PruneMib), SettingValue::Int(2048));
    assert_eq!(second.store().get("fReset"), Some(SettingValue::Bool(true)));
}
