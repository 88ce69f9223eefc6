//! Change notifications emitted by the options model.
//!
//! The model hands out the receiving end of a channel from
//! [`OptionsModel::new`](super::options_model::OptionsModel::new).  Each
//! event fires only when the underlying value actually changed; the one
//! exception is `init`, which broadcasts the loaded tray-icon and peers-tab
//! flags so listeners start in sync.

use nodeopts_core::{DisplayUnit, OptionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsEvent {
    /// A row was written and its value changed.
    DataChanged(OptionId),
    DisplayUnitChanged(DisplayUnit),
    HideTrayIconChanged(bool),
    CoinControlFeaturesChanged(bool),
    PeersTabAlternatingRowColorsChanged(bool),
    RestartRequiredChanged(bool),
}
