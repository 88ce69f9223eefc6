//! Chain selection and the per-chain parameters the settings model needs.

use std::fmt;
use std::str::FromStr;

use super::value::ParseError;

/// Network the node runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chain {
    #[default]
    Main,
    Test,
    Signet,
    Regtest,
}

impl Chain {
    /// Default P2P listening port, used when the port box is left empty.
    pub fn default_port(self) -> u16 {
        match self {
            Chain::Main => 8333,
            Chain::Test => 18333,
            Chain::Signet => 38333,
            Chain::Regtest => 18444,
        }
    }

    /// Sub-directory of the data dir holding this chain's files
    /// (empty for mainnet).
    pub fn data_subdir(self) -> &'static str {
        match self {
            Chain::Main => "",
            Chain::Test => "testnet3",
            Chain::Signet => "signet",
            Chain::Regtest => "regtest",
        }
    }

    /// Section name used in the node config file (`[test]`, `[main]`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Chain::Main => "main",
            Chain::Test => "test",
            Chain::Signet => "signet",
            Chain::Regtest => "regtest",
        }
    }
}

impl FromStr for Chain {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "main" => Ok(Chain::Main),
            "test" | "testnet" => Ok(Chain::Test),
            "signet" => Ok(Chain::Signet),
            "regtest" => Ok(Chain::Regtest),
            other => Err(ParseError::UnknownChain(other.to_string())),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
