//! Proxy address setting: a single stored `"ip:port"` string.
//!
//! Decoding is tolerant: anything that does not split into exactly two
//! non-empty parts is reported as "not set" together with the default pair,
//! so a corrupt or half-written value never reaches the node.

/// Host used when no proxy address has been stored.
pub const DEFAULT_GUI_PROXY_HOST: &str = "127.0.0.1";

/// Port used when no proxy address has been stored.
pub const DEFAULT_GUI_PROXY_PORT: u16 = 9050;

/// Literal suffix left behind by an old formatting bug that wrote the
/// unexpanded `%1:%2` template into the proxy settings.
pub const CORRUPT_PROXY_SUFFIX: &str = "%2";

/// Parsed view of a stored proxy address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySetting {
    /// `true` only when the stored string held exactly one `ip:port` pair.
    pub is_set: bool,
    pub ip: String,
    pub port: String,
}

impl ProxySetting {
    /// The documented default pair, flagged as not set.
    pub fn unset() -> Self {
        Self {
            is_set: false,
            ip: DEFAULT_GUI_PROXY_HOST.to_string(),
            port: DEFAULT_GUI_PROXY_PORT.to_string(),
        }
    }

    /// Decodes a stored value; `None` means the key is absent.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::unset();
        };
        let parts: Vec<&str> = raw.split(':').filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            [ip, port] => Self {
                is_set: true,
                ip: (*ip).to_string(),
                port: (*port).to_string(),
            },
            _ => Self::unset(),
        }
    }

    /// Encodes the pair as `ip:port` for storage.
    pub fn encode(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

impl Default for ProxySetting {
    fn default() -> Self {
        Self::unset()
    }
}

/// The default proxy address in stored form, `127.0.0.1:9050`.
pub fn default_proxy_address() -> String {
    format!("{DEFAULT_GUI_PROXY_HOST}:{DEFAULT_GUI_PROXY_PORT}")
}

/// Whether a stored proxy address carries the historical corrupt suffix.
pub fn is_corrupt_proxy_address(raw: &str) -> bool {
    raw.ends_with(CORRUPT_PROXY_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_then_parse_keeps_ip_and_port() {
        // Arrange
        let proxy = ProxySetting {
            is_set: true,
            ip: "127.0.0.1".to_string(),
            port: "9050".to_string(),
        };

        // Act
        let decoded = ProxySetting::parse(Some(&proxy.encode()));

        // Assert
        assert_eq!(decoded, proxy);
    }

    #[test]
    fn test_parse_without_colon_is_unset() {
        let decoded = ProxySetting::parse(Some("localhost"));
        assert!(!decoded.is_set);
        assert_eq!(decoded.ip, "127.0.0.1");
        assert_eq!(decoded.port, "9050");
    }

    #[test]
    fn test_parse_with_two_colons_is_unset() {
        let decoded = ProxySetting::parse(Some("10.0.0.1:9050:1"));
        assert_eq!(decoded, ProxySetting::unset());
    }

    #[test]
    fn test_parse_absent_is_unset() {
        assert_eq!(ProxySetting::parse(None), ProxySetting::unset());
    }

    #[test]
    fn test_parse_skips_empty_parts() {
        // A trailing colon leaves a single non-empty part.
        assert!(!ProxySetting::parse(Some("10.0.0.1:")).is_set);
    }

    #[test]
    fn test_default_proxy_address_is_not_corrupt() {
        assert_eq!(default_proxy_address(), "127.0.0.1:9050");
        assert!(!is_corrupt_proxy_address(&default_proxy_address()));
        assert!(is_corrupt_proxy_address("127.0.0.1:%2"));
    }
}
