//! Typed setting values.
//!
//! A [`SettingValue`] is what the settings store persists and what the
//! indexed `data`/`set_data` interface exchanges with the UI.  Conversions
//! are deliberately lenient: a value written by an older client as text can
//! still be read back as a bool or integer, mirroring how a desktop settings
//! registry coerces values on read.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::options::ValueKind;

/// Error type for parsing user-supplied or stored text into typed values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not a recognised boolean literal.
    #[error("invalid boolean value: {0:?}")]
    InvalidBool(String),
    /// The text is not a base-10 integer.
    #[error("invalid integer value: {0:?}")]
    InvalidInt(String),
    /// The text does not name a known display unit.
    #[error("unknown display unit: {0:?}")]
    UnknownUnit(String),
    /// The text does not name a known address output type.
    #[error("unknown output type: {0:?}")]
    UnknownOutputType(String),
    /// The text does not name a known chain.
    #[error("unknown chain: {0:?}")]
    UnknownChain(String),
    /// The text does not name a known option row.
    #[error("unknown option: {0:?}")]
    UnknownOption(String),
}

/// A persisted or UI-exchanged setting value.
///
/// Serialized untagged, so a TOML store reads `fListen = true`,
/// `nDatabaseCache = 450` and `language = ""` directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl SettingValue {
    /// Coerces the value to a boolean.
    ///
    /// Text is `false` when empty, `"0"` or `"false"` (case-insensitive) and
    /// `true` otherwise.
    pub fn to_bool(&self) -> bool {
        match self {
            SettingValue::Bool(b) => *b,
            SettingValue::Int(i) => *i != 0,
            SettingValue::Text(s) => {
                let s = s.trim();
                !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
            }
        }
    }

    /// Coerces the value to an integer; unparseable text yields `0`.
    pub fn to_i64(&self) -> i64 {
        match self {
            SettingValue::Bool(b) => i64::from(*b),
            SettingValue::Int(i) => *i,
            SettingValue::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }

    /// Renders the value as text, the way it would be shown in an edit box.
    pub fn to_text(&self) -> String {
        match self {
            SettingValue::Bool(b) => b.to_string(),
            SettingValue::Int(i) => i.to_string(),
            SettingValue::Text(s) => s.clone(),
        }
    }

    /// Returns the value coerced to `kind`.
    pub fn coerce(&self, kind: ValueKind) -> SettingValue {
        match kind {
            ValueKind::Bool => SettingValue::Bool(self.to_bool()),
            ValueKind::Int => SettingValue::Int(self.to_i64()),
            ValueKind::Text => SettingValue::Text(self.to_text()),
        }
    }

    /// Parses raw text (e.g. from a command line) strictly into `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidBool`] or [`ParseError::InvalidInt`] when
    /// the text is not a valid literal for the requested kind.
    pub fn parse_as(kind: ValueKind, raw: &str) -> Result<SettingValue, ParseError> {
        let trimmed = raw.trim();
        match kind {
            ValueKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(SettingValue::Bool(true)),
                "0" | "false" | "no" | "off" => Ok(SettingValue::Bool(false)),
                _ => Err(ParseError::InvalidBool(raw.to_string())),
            },
            ValueKind::Int => trimmed
                .parse()
                .map(SettingValue::Int)
                .map_err(|_| ParseError::InvalidInt(raw.to_string())),
            ValueKind::Text => Ok(SettingValue::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        SettingValue::Int(i)
    }
}

impl From<i32> for SettingValue {
    fn from(i: i32) -> Self {
        SettingValue::Int(i64::from(i))
    }
}

impl From<u16> for SettingValue {
    fn from(i: u16) -> Self {
        SettingValue::Int(i64::from(i))
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}
