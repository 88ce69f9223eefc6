//! Row-indexed reads and writes used by the options dialog.

use nodeopts_core::domain::options::{
    DEFAULT_BLOCKFILTERINDEX, DEFAULT_PEERBLOCKFILTERS, DEFAULT_PEERS_TAB_ALTERNATING_ROW_COLORS,
};
use nodeopts_core::domain::prune::{is_pruning_target, prune_mib_to_gb};
use nodeopts_core::{
    DisplayUnit, OptionId, OutputType, ProxySetting, SettingKey, SettingValue,
    ValueKind,
};
use tracing::{debug, warn};

use super::OptionsModel;
use crate::application::events::OptionsEvent;
use crate::application::node::BlockFilterType;

const MIB: u64 = 1024 * 1024;

/// Which half of a stored `ip:port` pair a row edits.
#[derive(Clone, Copy)]
enum ProxyPart {
    Ip,
    Port,
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

impl OptionsModel {
    /// Number of rows the dialog can address.
    pub fn row_count(&self) -> usize {
        OptionId::COUNT
    }

    /// Current value of `row`, `None` for rows outside the catalogue.
    pub fn data(&self, row: usize) -> Option<SettingValue> {
        OptionId::from_row(row).map(|id| self.option(id))
    }

    /// Current value of one option.
    pub fn option(&self, id: OptionId) -> SettingValue {
        match id {
            OptionId::StartAtStartup => self.startup.is_enabled().into(),
            OptionId::HideTrayIcon => self.cache.hide_tray_icon.into(),
            OptionId::MinimizeToTray => self.cache.minimize_to_tray.into(),
            OptionId::MinimizeOnClose => self.cache.minimize_on_close.into(),
            OptionId::DisplayUnit => SettingValue::Int(self.cache.display_unit.index()),
            OptionId::DisplayAddresses => self.cache.display_addresses.into(),
            OptionId::ThirdPartyTxUrls => self.cache.third_party_tx_urls.clone().into(),
            OptionId::CoinControlFeatures => self.cache.coin_control_features.into(),
            OptionId::PeerBloomFilters => self.cache.peer_bloom_filters.into(),
            OptionId::PeersTabAlternatingRowColors => {
                self.peers_tab_alternating_row_colors().into()
            }
            OptionId::ProxyIp => self.proxy(SettingKey::ProxyAddress).ip.into(),
            OptionId::ProxyPort => self.proxy(SettingKey::ProxyAddress).port.into(),
            OptionId::ProxyIpTor => self.proxy(SettingKey::SeparateProxyTorAddress).ip.into(),
            OptionId::ProxyPortTor => self.proxy(SettingKey::SeparateProxyTorAddress).port.into(),
            OptionId::AddressType => self.address_type().as_str().into(),
            OptionId::PruneMib => SettingValue::Int(self.args.get_int_arg("-prune", 0)),
            OptionId::MaxUploadTarget => {
                let mib = self.node.max_outbound_target() / MIB;
                SettingValue::Int(i64::try_from(mib).unwrap_or(i64::MAX))
            }
            OptionId::PeerBlockFilters => self
                .args
                .get_bool_arg("-peerblockfilters", DEFAULT_PEERBLOCKFILTERS)
                .into(),
            // The remaining rows are stored one-to-one.
            _ => match id.storage_key() {
                Some(key) => self.stored(key, id.kind()),
                None => SettingValue::Bool(false),
            },
        }
    }

    /// Writes `value` into `row`.
    ///
    /// Returns `false` only when the write was attempted and failed (today:
    /// start-at-login registration).  Writes to unknown rows, and writes that
    /// leave the value unchanged, succeed without side effects.
    pub fn set_data(&mut self, row: usize, value: SettingValue) -> bool {
        match OptionId::from_row(row) {
            Some(id) => self.set_option(id, value),
            None => true,
        }
    }

    /// Writes one option; see [`set_data`](Self::set_data).
    pub fn set_option(&mut self, id: OptionId, value: SettingValue) -> bool {
        let mut successful = true;
        let changed = match id {
            OptionId::StartAtStartup => {
                let enable = value.to_bool();
                if self.startup.is_enabled() == enable {
                    false
                } else {
                    match self.startup.set_enabled(enable) {
                        Ok(()) => true,
                        Err(e) => {
                            warn!(error = %e, enable, "start-at-login registration failed");
                            successful = false;
                            false
                        }
                    }
                }
            }
            OptionId::HideTrayIcon => {
                let hide = value.to_bool();
                let changed = self.update_cached_bool(id, hide, SettingKey::HideTrayIcon);
                if changed {
                    self.emit(OptionsEvent::HideTrayIconChanged(hide));
                }
                changed
            }
            OptionId::MinimizeToTray => {
                self.update_cached_bool(id, value.to_bool(), SettingKey::MinimizeToTray)
            }
            OptionId::MinimizeOnClose => {
                self.update_cached_bool(id, value.to_bool(), SettingKey::MinimizeOnClose)
            }
            OptionId::DisplayAddresses => {
                self.update_cached_bool(id, value.to_bool(), SettingKey::DisplayAddresses)
            }
            OptionId::CoinControlFeatures => {
                let enabled = value.to_bool();
                let changed = self.update_cached_bool(id, enabled, SettingKey::CoinControlFeatures);
                if changed {
                    self.emit(OptionsEvent::CoinControlFeaturesChanged(enabled));
                }
                changed
            }
            OptionId::ThirdPartyTxUrls => {
                let urls = value.to_text();
                if self.cache.third_party_tx_urls == urls {
                    false
                } else {
                    self.write(SettingKey::ThirdPartyTxUrls, urls.clone());
                    self.cache.third_party_tx_urls = urls;
                    true
                }
            }
            OptionId::Language => {
                let language = value.to_text();
                if self.read_text(SettingKey::Language) == language {
                    false
                } else {
                    self.write(SettingKey::Language, language.clone());
                    self.cache.language = language;
                    true
                }
            }
            OptionId::DisplayUnit => self.set_display_unit(&value),
            OptionId::PeersTabAlternatingRowColors => {
                let enabled = value.to_bool();
                if self.peers_tab_alternating_row_colors() == enabled {
                    false
                } else {
                    self.write(SettingKey::PeersTabAlternatingRowColors, enabled);
                    self.emit(OptionsEvent::PeersTabAlternatingRowColorsChanged(enabled));
                    true
                }
            }
            OptionId::NetworkPort => {
                let default_port = self.defaults.chain.default_port();
                let port = if value.to_text().trim().is_empty() {
                    default_port
                } else {
                    u16::try_from(value.to_i64()).unwrap_or(default_port)
                };
                self.update_stored(SettingKey::NetworkPort, ValueKind::Int, port.into())
            }
            OptionId::MapPortUpnp => {
                let enable = value.to_bool();
                let changed =
                    self.update_stored(SettingKey::UseUpnp, ValueKind::Bool, enable.into());
                if changed {
                    self.node.map_port(enable);
                }
                changed
            }
            OptionId::ProxyUse
            | OptionId::ProxyUseTor
            | OptionId::SpendZeroConfChange
            | OptionId::Listen => match id.storage_key() {
                Some(key) => self.update_stored(key, ValueKind::Bool, value.to_bool().into()),
                None => false,
            },
            OptionId::DatabaseCache | OptionId::ThreadsScriptVerif => match id.storage_key() {
                Some(key) => self.update_stored(key, ValueKind::Int, value.to_i64().into()),
                None => false,
            },
            OptionId::ProxyIp => {
                self.update_proxy(SettingKey::ProxyAddress, ProxyPart::Ip, value.to_text())
            }
            OptionId::ProxyPort => {
                self.update_proxy(SettingKey::ProxyAddress, ProxyPart::Port, value.to_text())
            }
            OptionId::ProxyIpTor => self.update_proxy(
                SettingKey::SeparateProxyTorAddress,
                ProxyPart::Ip,
                value.to_text(),
            ),
            OptionId::ProxyPortTor => self.update_proxy(
                SettingKey::SeparateProxyTorAddress,
                ProxyPart::Port,
                value.to_text(),
            ),
            OptionId::AddressType => self.set_address_type(&value),
            OptionId::PruneMib => self.set_prune_from_dialog(value.to_i64()),
            OptionId::MaxUploadTarget => {
                let mib = value.to_i64().max(0);
                let current = self.node.max_outbound_target() / MIB;
                if i64::try_from(current).ok() == Some(mib) {
                    false
                } else {
                    self.args
                        .modify_rw_config("maxuploadtarget", &mib.to_string(), true);
                    let bytes = u64::try_from(mib).unwrap_or(0).saturating_mul(MIB);
                    self.node.set_max_outbound_target(bytes);
                    true
                }
            }
            OptionId::PeerBloomFilters => {
                let enabled = value.to_bool();
                if self.cache.peer_bloom_filters == enabled {
                    false
                } else {
                    self.args
                        .modify_rw_config("peerbloomfilters", flag(enabled), true);
                    self.cache.peer_bloom_filters = enabled;
                    true
                }
            }
            OptionId::PeerBlockFilters => self.set_peer_block_filters(value.to_bool()),
        };

        if changed {
            if id.requires_restart() {
                self.set_restart_required(true);
            }
            debug!(option = %id, "option changed");
            self.emit(OptionsEvent::DataChanged(id));
        }
        successful
    }

    /// Changes the display unit.  Accepts a unit index or a unit name;
    /// anything else is ignored.  Returns whether the unit changed.
    pub fn set_display_unit(&mut self, value: &SettingValue) -> bool {
        let unit = match value {
            SettingValue::Int(index) => DisplayUnit::from_index(*index),
            SettingValue::Text(name) => name.parse().ok(),
            SettingValue::Bool(_) => None,
        };
        let Some(unit) = unit else {
            debug!(value = %value, "ignoring unrecognised display unit");
            return false;
        };
        if unit == self.cache.display_unit {
            return false;
        }
        self.cache.display_unit = unit;
        self.write(SettingKey::DisplayUnit, unit.to_setting());
        self.emit(OptionsEvent::DisplayUnitChanged(unit));
        true
    }

    pub fn peers_tab_alternating_row_colors(&self) -> bool {
        self.read(SettingKey::PeersTabAlternatingRowColors)
            .map_or(DEFAULT_PEERS_TAB_ALTERNATING_ROW_COLORS, |v| v.to_bool())
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn stored(&self, key: SettingKey, kind: ValueKind) -> SettingValue {
        self.read(key)
            .or_else(|| key.default_value(&self.defaults))
            .map_or_else(
                || match kind {
                    ValueKind::Bool => SettingValue::Bool(false),
                    ValueKind::Int => SettingValue::Int(0),
                    ValueKind::Text => SettingValue::Text(String::new()),
                },
                |v| v.coerce(kind),
            )
    }

    fn update_stored(&mut self, key: SettingKey, kind: ValueKind, value: SettingValue) -> bool {
        if self.stored(key, kind) == value {
            return false;
        }
        self.write(key, value);
        true
    }

    fn update_cached_bool(&mut self, id: OptionId, value: bool, key: SettingKey) -> bool {
        let slot = match id {
            OptionId::HideTrayIcon => &mut self.cache.hide_tray_icon,
            OptionId::MinimizeToTray => &mut self.cache.minimize_to_tray,
            OptionId::MinimizeOnClose => &mut self.cache.minimize_on_close,
            OptionId::DisplayAddresses => &mut self.cache.display_addresses,
            OptionId::CoinControlFeatures => &mut self.cache.coin_control_features,
            _ => return false,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        self.write(key, value);
        true
    }

    fn proxy(&self, key: SettingKey) -> ProxySetting {
        let stored = self.read(key).map(|v| v.to_text());
        ProxySetting::parse(stored.as_deref())
    }

    fn update_proxy(&mut self, key: SettingKey, part: ProxyPart, text: String) -> bool {
        let mut proxy = self.proxy(key);
        let slot = match part {
            ProxyPart::Ip => &mut proxy.ip,
            ProxyPart::Port => &mut proxy.port,
        };
        if !proxy.is_set || *slot != text {
            *slot = text;
            self.write(key, proxy.encode());
            return true;
        }
        false
    }

    fn address_type(&self) -> OutputType {
        OutputType::parse_or_default(&self.args.get_arg("-addresstype", ""))
    }

    fn set_address_type(&mut self, value: &SettingValue) -> bool {
        let requested = value.to_text();
        let output_type: OutputType = match requested.parse() {
            Ok(output_type) => output_type,
            Err(e) => {
                debug!(error = %e, "ignoring unknown address type");
                return false;
            }
        };
        if output_type == self.address_type() {
            return false;
        }
        self.args
            .modify_rw_config("addresstype", output_type.as_str(), true);
        self.args.force_set_arg("-addresstype", output_type.as_str());
        self.node.set_wallets_default_address_type(output_type);
        true
    }

    fn set_prune_from_dialog(&mut self, prune_target_mib: i64) -> bool {
        if self.args.get_int_arg("-prune", 0) == prune_target_mib {
            return false;
        }
        self.args
            .modify_rw_config("prune", &prune_target_mib.to_string(), true);
        let prune = is_pruning_target(prune_target_mib);
        self.write(SettingKey::Prune, prune);
        if prune {
            self.write(SettingKey::PruneSize, prune_mib_to_gb(prune_target_mib));
        }
        // A pruned node cannot keep a block filter index; stop it from
        // blocking the next startup.
        if prune_target_mib != 0
            && self.args.get_arg("-blockfilterindex", DEFAULT_BLOCKFILTERINDEX) != "0"
        {
            self.args.modify_rw_config("blockfilterindex", "0", true);
        }
        true
    }

    fn block_filter_index_enabled(&self) -> bool {
        self.node.has_block_filter_index(BlockFilterType::Basic)
            || self.args.get_arg("-blockfilterindex", DEFAULT_BLOCKFILTERINDEX) != "0"
    }

    fn set_peer_block_filters(&mut self, enabled: bool) -> bool {
        if self
            .args
            .get_bool_arg("-peerblockfilters", DEFAULT_PEERBLOCKFILTERS)
            == enabled
        {
            return false;
        }
        self.args
            .modify_rw_config("peerblockfilters", flag(enabled), true);
        // Older nodes read the pre-rename name.
        self.args.modify_rw_config("peercfilters", flag(enabled), false);
        self.args.force_set_arg("-peerblockfilters", flag(enabled));
        if enabled && !self.block_filter_index_enabled() {
            self.args.modify_rw_config("blockfilterindex", "basic", true);
            self.args.force_set_arg("-blockfilterindex", "basic");
            // Building the index needs a restart.
            self.set_restart_required(true);
        }
        true
    }
}
