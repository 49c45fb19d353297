//! Entitlement client configuration
//!
//! A session is bound to exactly one entitlement server. The URL is checked
//! once, up front; nothing downstream re-validates it.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Connect timeout applied to every request unless configured otherwise
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

/// Server endpoint and transport settings for one entitlement session.
///
/// ```toml
/// server_url = "https://entitlement.example.com/wifi"
/// connect_timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementConfig {
    /// Entitlement server endpoint; must be `https`
    pub server_url: String,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl EntitlementConfig {
    /// Configuration with default transport settings
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Connect timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate settings and return the parsed server URL
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.server_url)?;
        if url.scheme() != "https" {
            return Err(ConfigError::InsecureScheme(url.scheme().to_string()));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_https_url_is_accepted() {
        let url = EntitlementConfig::new("https://example.com").validate().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_http_url_is_rejected() {
        let err = EntitlementConfig::new("http://example.com")
            .validate()
            .unwrap_err();
        assert_matches!(err, ConfigError::InsecureScheme(scheme) if scheme == "http");
    }

    #[test]
    fn test_malformed_url_is_rejected() {
        let err = EntitlementConfig::new("not a url").validate().unwrap_err();
        assert_matches!(err, ConfigError::MalformedUrl(_));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = EntitlementConfig {
            connect_timeout_secs: 0,
            ..EntitlementConfig::new("https://example.com")
        };
        assert_matches!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_toml_defaults_timeout() {
        let config =
            EntitlementConfig::from_toml_str("server_url = \"https://example.com/ts43\"").unwrap();
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_missing_url_fails() {
        assert_matches!(
            EntitlementConfig::from_toml_str("connect_timeout_secs = 5"),
            Err(ConfigError::Toml(_))
        );
    }
}
