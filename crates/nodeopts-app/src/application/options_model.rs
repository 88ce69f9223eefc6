//! The options model: the single place where the options dialog, the
//! persistent settings store and the node's runtime arguments meet.
//!
//! # Lifecycle
//!
//! 1. [`OptionsModel::new`] builds the model and runs [`OptionsModel::init`]:
//!    an optional reset, migration of old settings, seeding of every absent
//!    key with its default, and forwarding of stored values into the runtime
//!    arguments (soft-set, so the command line and config file always win).
//! 2. The dialog reads rows with [`OptionsModel::data`] and writes them with
//!    [`OptionsModel::set_data`].
//! 3. Listeners drain the [`OptionsEvent`] receiver returned by `new`.
//!
//! Values the dialog shows but another component owns (wallet address type,
//! upload cap, prune target, filter flags) are read live from the runtime
//! arguments or the node and written back to the RW config.

mod access;

use std::sync::mpsc::{self, Receiver, Sender};

use nodeopts_core::domain::options::{
    CLIENT_VERSION, DB_CACHE_MIGRATION_VERSION, DEFAULT_DB_CACHE_MIB, DEFAULT_PEERBLOOMFILTERS,
    INIT_ENTRIES, LEGACY_DB_CACHE_MIB,
};
use nodeopts_core::domain::proxy::{default_proxy_address, is_corrupt_proxy_address};
use nodeopts_core::domain::prune::{
    is_pruning_target, prune_gb_to_mib, prune_mib_to_gb, DEFAULT_PRUNE_TARGET_GB,
};
use nodeopts_core::{
    DisplayUnit, Forward, RuntimeArgs, SettingDefaults, SettingKey, SettingValue,
};
use tracing::{debug, info, warn};

use super::events::OptionsEvent;
use super::node::NodeInterface;
use super::settings_store::SettingsStore;
use super::startup::StartupRegistrar;

/// File name of the settings backup written by [`OptionsModel::reset`].
pub const BACKUP_FILE_NAME: &str = "guisettings.ini.bak";

/// The collaborators an [`OptionsModel`] drives.
pub struct OptionsBackends {
    pub store: Box<dyn SettingsStore>,
    pub args: Box<dyn RuntimeArgs>,
    pub node: Box<dyn NodeInterface>,
    pub startup: Box<dyn StartupRegistrar>,
}

/// GUI-only settings held in memory after `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedOptions {
    pub hide_tray_icon: bool,
    /// Always `false` while the tray icon is hidden.
    pub minimize_to_tray: bool,
    pub minimize_on_close: bool,
    pub display_unit: DisplayUnit,
    pub display_addresses: bool,
    pub third_party_tx_urls: String,
    pub coin_control_features: bool,
    pub peer_bloom_filters: bool,
    pub language: String,
}

pub struct OptionsModel {
    store: Box<dyn SettingsStore>,
    args: Box<dyn RuntimeArgs>,
    node: Box<dyn NodeInterface>,
    startup: Box<dyn StartupRegistrar>,
    defaults: SettingDefaults,
    cache: CachedOptions,
    /// `-name=value ` pairs that blocked a stored setting.
    overridden: String,
    events: Sender<OptionsEvent>,
}

impl OptionsModel {
    /// Builds the model, runs [`init`](Self::init) and returns the event
    /// receiver.
    ///
    /// `default_data_dir` seeds `strDataDir` when it is absent.
    pub fn new(
        backends: OptionsBackends,
        default_data_dir: impl Into<String>,
        reset_settings: bool,
    ) -> (Self, Receiver<OptionsEvent>) {
        let (tx, rx) = mpsc::channel();
        let defaults = SettingDefaults {
            chain: backends.node.chain(),
            data_dir: default_data_dir.into(),
        };
        let mut model = Self {
            store: backends.store,
            args: backends.args,
            node: backends.node,
            startup: backends.startup,
            defaults,
            cache: CachedOptions::default(),
            overridden: String::new(),
            events: tx,
        };
        model.init(reset_settings);
        (model, rx)
    }

    // ── Initialisation ──────────────────────────────────────────────────────

    /// Loads every setting, seeding absent keys with their defaults and
    /// forwarding stored values into the runtime arguments.
    pub fn init(&mut self, reset_settings: bool) {
        self.overridden.clear();
        if reset_settings {
            self.reset();
        }

        self.check_and_migrate();

        // A restart is only pending within the session that asked for it.
        self.set_restart_required(false);

        for entry in INIT_ENTRIES {
            self.seed(entry.key);
            match entry.forward {
                Forward::None => {}
                Forward::SoftSet(arg) => {
                    let value = self.read_text(entry.key);
                    if !self.args.soft_set_arg(arg, &value).is_applied() {
                        self.add_overridden(arg);
                    }
                }
                Forward::SoftSetBool(arg) => {
                    let value = self.read_bool(entry.key);
                    if !self.args.soft_set_bool_arg(arg, value).is_applied() {
                        self.add_overridden(arg);
                    }
                }
                Forward::Proxy { address, arg } => {
                    if self.read_bool(entry.key) {
                        let value = self.read_text(address);
                        if !self.args.soft_set_arg(arg, &value).is_applied() {
                            self.add_overridden(arg);
                        }
                    } else if !self.args.get_arg(arg, "").is_empty() {
                        self.add_overridden(arg);
                    }
                }
            }
        }
        self.apply_stored_prune();
        self.load_cache();

        self.emit(OptionsEvent::HideTrayIconChanged(self.cache.hide_tray_icon));
        self.emit(OptionsEvent::PeersTabAlternatingRowColorsChanged(
            self.peers_tab_alternating_row_colors(),
        ));

        if self.overridden.is_empty() {
            info!("options loaded");
        } else {
            info!(overridden = %self.overridden.trim_end(), "options loaded; some are overridden");
        }
    }

    /// Upgrades settings written by older clients and repairs known
    /// corruption.  Idempotent.
    pub fn check_and_migrate(&mut self) {
        let version = self.read(SettingKey::SettingsVersion).map_or(0, |v| v.to_i64());
        if version < CLIENT_VERSION {
            // The old default cache size was too small; lift it only if the
            // user never touched it.
            if version < DB_CACHE_MIGRATION_VERSION
                && self.read(SettingKey::DatabaseCache).map(|v| v.to_i64())
                    == Some(LEGACY_DB_CACHE_MIB)
            {
                info!(
                    from = LEGACY_DB_CACHE_MIB,
                    to = DEFAULT_DB_CACHE_MIB,
                    "migrating database cache size"
                );
                self.write(SettingKey::DatabaseCache, DEFAULT_DB_CACHE_MIB);
            }
            self.write(SettingKey::SettingsVersion, CLIENT_VERSION);
        }

        for key in [SettingKey::ProxyAddress, SettingKey::SeparateProxyTorAddress] {
            let Some(stored) = self.read(key) else {
                continue;
            };
            if is_corrupt_proxy_address(&stored.to_text()) {
                warn!(key = %key, value = %stored, "repairing corrupt proxy address");
                self.write(key, default_proxy_address());
            }
        }
    }

    /// Backs the store up into the node data directory and wipes it, keeping
    /// only the data directory and the RW config's prune target.
    ///
    /// Call [`init`](Self::init) afterwards to reseed defaults.
    pub fn reset(&mut self) {
        let backup_path = self.node.data_dir().join(BACKUP_FILE_NAME);
        info!(path = %backup_path.display(), "backing up settings before reset");
        if let Err(e) = self.store.backup(&backup_path) {
            warn!(error = %e, "settings backup failed; resetting anyway");
        }

        let data_dir = self
            .read(SettingKey::DataDir)
            .map_or_else(|| self.defaults.data_dir.clone(), |v| v.to_text());
        let prune_mib = self
            .args
            .rw_config_has_prune_option()
            .then(|| self.args.get_int_arg("-prune", 0));
        let was_restart_required = self.is_restart_required();

        self.args.erase_rw_config();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear settings store");
        }

        self.write(SettingKey::DataDir, data_dir);
        if let Some(mib) = prune_mib {
            self.set_prune_mib(mib, false);
        }
        self.write(SettingKey::Reset, true);
        if was_restart_required {
            self.emit(OptionsEvent::RestartRequiredChanged(false));
        }

        if self.startup.is_enabled() {
            if let Err(e) = self.startup.set_enabled(false) {
                warn!(error = %e, "failed to remove start-at-login registration");
            }
        }
        info!("settings reset to defaults");
    }

    // ── Prune ───────────────────────────────────────────────────────────────

    /// Records a prune target (MiB) in the store and the RW config, then
    /// applies it to `-prune`: forcibly with `force`, otherwise as a
    /// soft-set that may be overridden.
    pub fn set_prune_mib(&mut self, prune_target_mib: i64, force: bool) {
        let prune = is_pruning_target(prune_target_mib);
        self.write(SettingKey::Prune, prune);
        if prune {
            self.write(SettingKey::PruneSize, prune_mib_to_gb(prune_target_mib));
        }

        let value = prune_target_mib.to_string();
        self.args.modify_rw_config("prune", &value, true);
        if force {
            self.args.force_set_arg("-prune", &value);
        } else if !self.args.soft_set_arg("-prune", &value).is_applied() {
            self.add_overridden("-prune");
        }
    }

    // ── Restart flag ────────────────────────────────────────────────────────

    pub fn set_restart_required(&mut self, required: bool) {
        let was = self.is_restart_required();
        self.write(SettingKey::RestartRequired, required);
        if was != required {
            self.emit(OptionsEvent::RestartRequiredChanged(required));
        }
    }

    pub fn is_restart_required(&self) -> bool {
        self.read(SettingKey::RestartRequired)
            .is_some_and(|v| v.to_bool())
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    /// Space-separated `-name=value` pairs for every stored setting that a
    /// higher-priority source blocked during `init`.
    pub fn overridden_by_command_line(&self) -> &str {
        &self.overridden
    }

    pub fn cache(&self) -> &CachedOptions {
        &self.cache
    }

    pub fn display_unit(&self) -> DisplayUnit {
        self.cache.display_unit
    }

    pub fn hide_tray_icon(&self) -> bool {
        self.cache.hide_tray_icon
    }

    pub fn minimize_to_tray(&self) -> bool {
        self.cache.minimize_to_tray
    }

    pub fn minimize_on_close(&self) -> bool {
        self.cache.minimize_on_close
    }

    pub fn third_party_tx_urls(&self) -> &str {
        &self.cache.third_party_tx_urls
    }

    pub fn coin_control_features(&self) -> bool {
        self.cache.coin_control_features
    }

    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    pub fn args(&self) -> &dyn RuntimeArgs {
        self.args.as_ref()
    }

    pub fn node(&self) -> &dyn NodeInterface {
        self.node.as_ref()
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn seed(&mut self, key: SettingKey) {
        if self.store.contains(key.name()) {
            return;
        }
        if let Some(value) = key.default_value(&self.defaults) {
            self.write(key, value);
        }
    }

    /// Forces `-prune` from the stored prune state unless the user passed
    /// `-prune` themselves.
    fn apply_stored_prune(&mut self) {
        if self.args.is_arg_set("-prune") {
            return;
        }
        let Some(prune) = self.read(SettingKey::Prune) else {
            return;
        };
        if prune.to_bool() {
            if !self.store.contains(SettingKey::PruneSize.name()) {
                self.write(SettingKey::PruneSize, DEFAULT_PRUNE_TARGET_GB);
            }
            let gb = self.read(SettingKey::PruneSize).map_or(0, |v| v.to_i64());
            self.args
                .force_set_arg("-prune", &prune_gb_to_mib(gb).to_string());
        } else {
            self.args.force_set_arg("-prune", "0");
        }
    }

    fn load_cache(&mut self) {
        let hide_tray_icon = self.read_bool(SettingKey::HideTrayIcon);
        self.cache = CachedOptions {
            hide_tray_icon,
            minimize_to_tray: self.read_bool(SettingKey::MinimizeToTray) && !hide_tray_icon,
            minimize_on_close: self.read_bool(SettingKey::MinimizeOnClose),
            display_unit: DisplayUnit::from_setting(&self.read_text(SettingKey::DisplayUnit)),
            display_addresses: self.read_bool(SettingKey::DisplayAddresses),
            third_party_tx_urls: self.read_text(SettingKey::ThirdPartyTxUrls),
            coin_control_features: self.read_bool(SettingKey::CoinControlFeatures),
            peer_bloom_filters: self
                .args
                .get_bool_arg("-peerbloomfilters", DEFAULT_PEERBLOOMFILTERS),
            language: self.read_text(SettingKey::Language),
        };
    }

    fn add_overridden(&mut self, arg: &str) {
        let value = self.args.get_arg(arg, "");
        self.overridden.push_str(&format!("{arg}={value} "));
        debug!(arg, value = %value, "stored setting overridden");
    }

    fn read(&self, key: SettingKey) -> Option<SettingValue> {
        self.store.get(key.name())
    }

    fn read_bool(&self, key: SettingKey) -> bool {
        self.read(key).is_some_and(|v| v.to_bool())
    }

    fn read_text(&self, key: SettingKey) -> String {
        self.read(key).map(|v| v.to_text()).unwrap_or_default()
    }

    fn write(&mut self, key: SettingKey, value: impl Into<SettingValue>) {
        if let Err(e) = self.store.set(key.name(), value.into()) {
            warn!(key = %key, error = %e, "failed to persist setting");
        }
    }

    fn emit(&self, event: OptionsEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }
}
