//! Display units for amounts shown in the dialog and the rest of the GUI.
//!
//! The unit is persisted by its setting string (`"BTC"`, `"mBTC"`, ...).
//! Older settings stores kept the numeric unit index instead; those are still
//! accepted when reading.

use std::fmt;
use std::str::FromStr;

use super::value::ParseError;

/// Unit used to display amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayUnit {
    #[default]
    Btc,
    MilliBtc,
    MicroBtc,
    Sat,
}

const UNITS: [DisplayUnit; 4] = [
    DisplayUnit::Btc,
    DisplayUnit::MilliBtc,
    DisplayUnit::MicroBtc,
    DisplayUnit::Sat,
];

impl DisplayUnit {
    pub fn iter() -> impl Iterator<Item = &'static DisplayUnit> {
        UNITS.iter()
    }

    /// Stable numeric index exchanged with the UI.
    pub fn index(self) -> i64 {
        match self {
            DisplayUnit::Btc => 0,
            DisplayUnit::MilliBtc => 1,
            DisplayUnit::MicroBtc => 2,
            DisplayUnit::Sat => 3,
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| UNITS.get(i).copied())
    }

    /// String persisted in the settings store.
    pub fn to_setting(self) -> &'static str {
        match self {
            DisplayUnit::Btc => "BTC",
            DisplayUnit::MilliBtc => "mBTC",
            DisplayUnit::MicroBtc => "uBTC",
            DisplayUnit::Sat => "SAT",
        }
    }

    /// Reads a persisted unit, falling back to [`DisplayUnit::Btc`] for
    /// anything unrecognised.
    pub fn from_setting(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    /// Number of decimal places shown for this unit.
    pub fn decimals(self) -> u8 {
        match self {
            DisplayUnit::Btc => 8,
            DisplayUnit::MilliBtc => 5,
            DisplayUnit::MicroBtc => 2,
            DisplayUnit::Sat => 0,
        }
    }
}

impl FromStr for DisplayUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<i64>() {
            return Self::from_index(index).ok_or_else(|| ParseError::UnknownUnit(s.to_string()));
        }
        UNITS
            .iter()
            .copied()
            .find(|u| u.to_setting().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownUnit(s.to_string()))
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_setting())
    }
}
