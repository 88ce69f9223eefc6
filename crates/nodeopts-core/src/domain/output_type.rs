//! Wallet address output types.

use std::fmt;
use std::str::FromStr;

use super::value::ParseError;

/// Kind of address a wallet hands out by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Legacy,
    P2shSegwit,
    Bech32,
}

/// Address type used when `-addresstype` is unset or unparseable.
pub const DEFAULT_ADDRESS_TYPE: OutputType = OutputType::Bech32;

impl OutputType {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputType::Legacy => "legacy",
            OutputType::P2shSegwit => "p2sh-segwit",
            OutputType::Bech32 => "bech32",
        }
    }

    /// Parses the `-addresstype` argument value, or returns the default.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or(DEFAULT_ADDRESS_TYPE)
    }
}

impl FromStr for OutputType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(OutputType::Legacy),
            "p2sh-segwit" => Ok(OutputType::P2shSegwit),
            "bech32" => Ok(OutputType::Bech32),
            other => Err(ParseError::UnknownOutputType(other.to_string())),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
