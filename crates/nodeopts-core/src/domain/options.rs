//! The option catalogue.
//!
//! Two enumerations describe everything the settings model knows about:
//!
//! - [`SettingKey`] names a value in the persistent settings store.  The key
//!   strings are the on-disk format and must never change, or existing
//!   stores stop being recognised.
//! - [`OptionId`] is the row index the options dialog addresses.  Rows are
//!   fixed and ordered; each maps to at most one backing [`SettingKey`].
//!
//! [`INIT_ENTRIES`] is the table `init` walks to seed missing settings and
//! forward them into the node's runtime arguments.

use std::fmt;
use std::str::FromStr;

use super::chain::Chain;
use super::proxy::default_proxy_address;
use super::units::DisplayUnit;
use super::value::{ParseError, SettingValue};

/// Version of this client, stored in `nSettingsVersion` after migration.
pub const CLIENT_VERSION: i64 = 210100;

/// Stores last written by a client older than this still carry the old
/// database cache default.
pub const DB_CACHE_MIGRATION_VERSION: i64 = 130000;

/// The database cache default shipped before [`DB_CACHE_MIGRATION_VERSION`].
pub const LEGACY_DB_CACHE_MIB: i64 = 100;

/// Current database cache default in MiB.
pub const DEFAULT_DB_CACHE_MIB: i64 = 450;

/// `0` lets the node pick the number of script verification threads.
pub const DEFAULT_SCRIPTCHECK_THREADS: i64 = 0;

pub const DEFAULT_UPNP: bool = false;
pub const DEFAULT_LISTEN: bool = true;
pub const DEFAULT_SPEND_ZEROCONF_CHANGE: bool = true;
pub const DEFAULT_PEERBLOOMFILTERS: bool = false;
pub const DEFAULT_PEERBLOCKFILTERS: bool = false;
pub const DEFAULT_BLOCKFILTERINDEX: &str = "0";
pub const DEFAULT_PEERS_TAB_ALTERNATING_ROW_COLORS: bool = true;

/// Values some defaults depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDefaults {
    pub chain: Chain,
    /// Platform default data directory, used to seed `strDataDir`.
    pub data_dir: String,
}

/// A key in the persistent settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    HideTrayIcon,
    MinimizeToTray,
    MinimizeOnClose,
    DisplayUnit,
    DisplayAddresses,
    ThirdPartyTxUrls,
    CoinControlFeatures,
    Prune,
    PruneSize,
    DatabaseCache,
    ThreadsScriptVerif,
    DataDir,
    SpendZeroConfChange,
    NetworkPort,
    UseUpnp,
    Listen,
    UseProxy,
    ProxyAddress,
    UseSeparateProxyTor,
    SeparateProxyTorAddress,
    Language,
    PeersTabAlternatingRowColors,
    RestartRequired,
    SettingsVersion,
    Reset,
}

impl SettingKey {
    /// The key string used in the settings store.
    pub fn name(self) -> &'static str {
        match self {
            SettingKey::HideTrayIcon => "fHideTrayIcon",
            SettingKey::MinimizeToTray => "fMinimizeToTray",
            SettingKey::MinimizeOnClose => "fMinimizeOnClose",
            SettingKey::DisplayUnit => "nDisplayUnit",
            SettingKey::DisplayAddresses => "bDisplayAddresses",
            SettingKey::ThirdPartyTxUrls => "strThirdPartyTxUrls",
            SettingKey::CoinControlFeatures => "fCoinControlFeatures",
            SettingKey::Prune => "bPrune",
            SettingKey::PruneSize => "nPruneSize",
            SettingKey::DatabaseCache => "nDatabaseCache",
            SettingKey::ThreadsScriptVerif => "nThreadsScriptVerif",
            SettingKey::DataDir => "strDataDir",
            SettingKey::SpendZeroConfChange => "bSpendZeroConfChange",
            SettingKey::NetworkPort => "nNetworkPort",
            SettingKey::UseUpnp => "fUseUPnP",
            SettingKey::Listen => "fListen",
            SettingKey::UseProxy => "fUseProxy",
            SettingKey::ProxyAddress => "addrProxy",
            SettingKey::UseSeparateProxyTor => "fUseSeparateProxyTor",
            SettingKey::SeparateProxyTorAddress => "addrSeparateProxyTor",
            SettingKey::Language => "language",
            SettingKey::PeersTabAlternatingRowColors => "PeersTabAlternatingRowColors",
            SettingKey::RestartRequired => "fRestartRequired",
            SettingKey::SettingsVersion => "nSettingsVersion",
            SettingKey::Reset => "fReset",
        }
    }

    /// Value written by `init` when the key is absent.
    ///
    /// Keys that `init` never seeds (prune state, bookkeeping flags) return
    /// `None`.
    pub fn default_value(self, defaults: &SettingDefaults) -> Option<SettingValue> {
        let value = match self {
            SettingKey::HideTrayIcon
            | SettingKey::MinimizeToTray
            | SettingKey::MinimizeOnClose
            | SettingKey::DisplayAddresses
            | SettingKey::CoinControlFeatures
            | SettingKey::UseProxy
            | SettingKey::UseSeparateProxyTor => SettingValue::Bool(false),
            SettingKey::DisplayUnit => DisplayUnit::Btc.to_setting().into(),
            SettingKey::ThirdPartyTxUrls | SettingKey::Language => SettingValue::from(""),
            SettingKey::DatabaseCache => SettingValue::Int(DEFAULT_DB_CACHE_MIB),
            SettingKey::ThreadsScriptVerif => SettingValue::Int(DEFAULT_SCRIPTCHECK_THREADS),
            SettingKey::DataDir => defaults.data_dir.clone().into(),
            SettingKey::SpendZeroConfChange => SettingValue::Bool(DEFAULT_SPEND_ZEROCONF_CHANGE),
            SettingKey::NetworkPort => defaults.chain.default_port().into(),
            SettingKey::UseUpnp => SettingValue::Bool(DEFAULT_UPNP),
            SettingKey::Listen => SettingValue::Bool(DEFAULT_LISTEN),
            SettingKey::ProxyAddress | SettingKey::SeparateProxyTorAddress => {
                default_proxy_address().into()
            }
            SettingKey::Prune
            | SettingKey::PruneSize
            | SettingKey::PeersTabAlternatingRowColors
            | SettingKey::RestartRequired
            | SettingKey::SettingsVersion
            | SettingKey::Reset => return None,
        };
        Some(value)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How `init` propagates a seeded setting into the runtime arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forward {
    /// GUI-only setting, loaded into the model's cache afterwards.
    None,
    /// Soft-set the stored value, as text, into the named argument.
    SoftSet(&'static str),
    /// Soft-set the stored value, as a bool, into the named argument.
    SoftSetBool(&'static str),
    /// The key is a "use proxy" flag: when true, soft-set the address
    /// stored under `address` into `arg`.
    Proxy {
        address: SettingKey,
        arg: &'static str,
    },
}

/// One row of the `init` seeding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitEntry {
    pub key: SettingKey,
    pub forward: Forward,
}

const fn entry(key: SettingKey, forward: Forward) -> InitEntry {
    InitEntry { key, forward }
}

/// Settings seeded by `init`, in order.  Prune state is handled separately
/// because it force-sets rather than soft-sets.
pub const INIT_ENTRIES: &[InitEntry] = &[
    entry(SettingKey::HideTrayIcon, Forward::None),
    entry(SettingKey::MinimizeToTray, Forward::None),
    entry(SettingKey::MinimizeOnClose, Forward::None),
    entry(SettingKey::DisplayUnit, Forward::None),
    entry(SettingKey::DisplayAddresses, Forward::None),
    entry(SettingKey::ThirdPartyTxUrls, Forward::None),
    entry(SettingKey::CoinControlFeatures, Forward::None),
    entry(SettingKey::DatabaseCache, Forward::SoftSet("-dbcache")),
    entry(SettingKey::ThreadsScriptVerif, Forward::SoftSet("-par")),
    entry(SettingKey::DataDir, Forward::None),
    entry(
        SettingKey::SpendZeroConfChange,
        Forward::SoftSetBool("-spendzeroconfchange"),
    ),
    entry(SettingKey::NetworkPort, Forward::SoftSet("-port")),
    entry(SettingKey::UseUpnp, Forward::SoftSetBool("-upnp")),
    entry(SettingKey::Listen, Forward::SoftSetBool("-listen")),
    // Addresses are seeded before their flags so the flag entry can forward them.
    entry(SettingKey::ProxyAddress, Forward::None),
    entry(
        SettingKey::UseProxy,
        Forward::Proxy {
            address: SettingKey::ProxyAddress,
            arg: "-proxy",
        },
    ),
    entry(SettingKey::SeparateProxyTorAddress, Forward::None),
    entry(
        SettingKey::UseSeparateProxyTor,
        Forward::Proxy {
            address: SettingKey::SeparateProxyTorAddress,
            arg: "-onion",
        },
    ),
    entry(SettingKey::Language, Forward::SoftSet("-lang")),
];

/// Kind of value a row exchanges with the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Text,
}

/// A row of the options dialog.
///
/// The discriminant is the row index; [`OptionId::ALL`] lists rows in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionId {
    StartAtStartup,
    HideTrayIcon,
    MinimizeToTray,
    NetworkPort,
    MapPortUpnp,
    MinimizeOnClose,
    ProxyUse,
    ProxyIp,
    ProxyPort,
    ProxyUseTor,
    ProxyIpTor,
    ProxyPortTor,
    DisplayUnit,
    DisplayAddresses,
    ThirdPartyTxUrls,
    Language,
    CoinControlFeatures,
    PeersTabAlternatingRowColors,
    ThreadsScriptVerif,
    PruneMib,
    DatabaseCache,
    SpendZeroConfChange,
    AddressType,
    Listen,
    MaxUploadTarget,
    PeerBloomFilters,
    PeerBlockFilters,
}

impl OptionId {
    pub const ALL: [OptionId; 27] = [
        OptionId::StartAtStartup,
        OptionId::HideTrayIcon,
        OptionId::MinimizeToTray,
        OptionId::NetworkPort,
        OptionId::MapPortUpnp,
        OptionId::MinimizeOnClose,
        OptionId::ProxyUse,
        OptionId::ProxyIp,
        OptionId::ProxyPort,
        OptionId::ProxyUseTor,
        OptionId::ProxyIpTor,
        OptionId::ProxyPortTor,
        OptionId::DisplayUnit,
        OptionId::DisplayAddresses,
        OptionId::ThirdPartyTxUrls,
        OptionId::Language,
        OptionId::CoinControlFeatures,
        OptionId::PeersTabAlternatingRowColors,
        OptionId::ThreadsScriptVerif,
        OptionId::PruneMib,
        OptionId::DatabaseCache,
        OptionId::SpendZeroConfChange,
        OptionId::AddressType,
        OptionId::Listen,
        OptionId::MaxUploadTarget,
        OptionId::PeerBloomFilters,
        OptionId::PeerBlockFilters,
    ];

    /// Number of rows in the dialog.
    pub const COUNT: usize = Self::ALL.len();

    pub fn row(self) -> usize {
        self as usize
    }

    pub fn from_row(row: usize) -> Option<Self> {
        Self::ALL.get(row).copied()
    }

    /// Stable snake_case name used by the CLI and UI bridge.
    pub fn name(self) -> &'static str {
        match self {
            OptionId::StartAtStartup => "start_at_startup",
            OptionId::HideTrayIcon => "hide_tray_icon",
            OptionId::MinimizeToTray => "minimize_to_tray",
            OptionId::NetworkPort => "network_port",
            OptionId::MapPortUpnp => "map_port_upnp",
            OptionId::MinimizeOnClose => "minimize_on_close",
            OptionId::ProxyUse => "proxy_use",
            OptionId::ProxyIp => "proxy_ip",
            OptionId::ProxyPort => "proxy_port",
            OptionId::ProxyUseTor => "proxy_use_tor",
            OptionId::ProxyIpTor => "proxy_ip_tor",
            OptionId::ProxyPortTor => "proxy_port_tor",
            OptionId::DisplayUnit => "display_unit",
            OptionId::DisplayAddresses => "display_addresses",
            OptionId::ThirdPartyTxUrls => "third_party_tx_urls",
            OptionId::Language => "language",
            OptionId::CoinControlFeatures => "coin_control_features",
            OptionId::PeersTabAlternatingRowColors => "peers_tab_alternating_row_colors",
            OptionId::ThreadsScriptVerif => "threads_script_verif",
            OptionId::PruneMib => "prune_mib",
            OptionId::DatabaseCache => "database_cache",
            OptionId::SpendZeroConfChange => "spend_zero_conf_change",
            OptionId::AddressType => "address_type",
            OptionId::Listen => "listen",
            OptionId::MaxUploadTarget => "max_upload_target",
            OptionId::PeerBloomFilters => "peer_bloom_filters",
            OptionId::PeerBlockFilters => "peer_block_filters",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            OptionId::NetworkPort
            | OptionId::DisplayUnit
            | OptionId::ThreadsScriptVerif
            | OptionId::PruneMib
            | OptionId::DatabaseCache
            | OptionId::MaxUploadTarget => ValueKind::Int,
            OptionId::ProxyIp
            | OptionId::ProxyPort
            | OptionId::ProxyIpTor
            | OptionId::ProxyPortTor
            | OptionId::ThirdPartyTxUrls
            | OptionId::Language
            | OptionId::AddressType => ValueKind::Text,
            _ => ValueKind::Bool,
        }
    }

    /// The store key backing this row, if the row is store-backed at all.
    ///
    /// Rows answered by the OS or the node (start-at-login, prune target,
    /// address type, upload target, filter propagation) have none.
    pub fn storage_key(self) -> Option<SettingKey> {
        let key = match self {
            OptionId::HideTrayIcon => SettingKey::HideTrayIcon,
            OptionId::MinimizeToTray => SettingKey::MinimizeToTray,
            OptionId::NetworkPort => SettingKey::NetworkPort,
            OptionId::MapPortUpnp => SettingKey::UseUpnp,
            OptionId::MinimizeOnClose => SettingKey::MinimizeOnClose,
            OptionId::ProxyUse => SettingKey::UseProxy,
            OptionId::ProxyIp | OptionId::ProxyPort => SettingKey::ProxyAddress,
            OptionId::ProxyUseTor => SettingKey::UseSeparateProxyTor,
            OptionId::ProxyIpTor | OptionId::ProxyPortTor => SettingKey::SeparateProxyTorAddress,
            OptionId::DisplayUnit => SettingKey::DisplayUnit,
            OptionId::DisplayAddresses => SettingKey::DisplayAddresses,
            OptionId::ThirdPartyTxUrls => SettingKey::ThirdPartyTxUrls,
            OptionId::Language => SettingKey::Language,
            OptionId::CoinControlFeatures => SettingKey::CoinControlFeatures,
            OptionId::PeersTabAlternatingRowColors => SettingKey::PeersTabAlternatingRowColors,
            OptionId::ThreadsScriptVerif => SettingKey::ThreadsScriptVerif,
            OptionId::DatabaseCache => SettingKey::DatabaseCache,
            OptionId::SpendZeroConfChange => SettingKey::SpendZeroConfChange,
            OptionId::Listen => SettingKey::Listen,
            OptionId::StartAtStartup
            | OptionId::PruneMib
            | OptionId::AddressType
            | OptionId::MaxUploadTarget
            | OptionId::PeerBloomFilters
            | OptionId::PeerBlockFilters => return None,
        };
        Some(key)
    }

    /// Rows the node only reads at startup: changing them flags
    /// "restart required".
    pub fn requires_restart(self) -> bool {
        matches!(
            self,
            OptionId::NetworkPort
                | OptionId::ProxyUse
                | OptionId::ProxyIp
                | OptionId::ProxyPort
                | OptionId::ProxyUseTor
                | OptionId::ProxyIpTor
                | OptionId::ProxyPortTor
                | OptionId::ThirdPartyTxUrls
                | OptionId::Language
                | OptionId::ThreadsScriptVerif
                | OptionId::PruneMib
                | OptionId::DatabaseCache
                | OptionId::SpendZeroConfChange
                | OptionId::Listen
                | OptionId::PeerBloomFilters
        )
    }

    /// Rows pushed into the running node immediately.
    pub fn is_applied_live(self) -> bool {
        matches!(
            self,
            OptionId::MapPortUpnp
                | OptionId::MaxUploadTarget
                | OptionId::AddressType
                | OptionId::PeerBlockFilters
        )
    }
}

impl FromStr for OptionId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ParseError::UnknownOption(s.to_string()))
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
