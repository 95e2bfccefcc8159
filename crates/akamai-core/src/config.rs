//! Configuration structures for Akamai API sessions.
//!
//! This module provides the configuration used to open a [`Session`](crate::session::Session):
//! the API host, account switching, TLS settings and request timeouts.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Configuration for an API session.
///
/// Controls which host requests are sent to and how the underlying HTTP
/// transport behaves. Request signing is expected to be handled upstream
/// (for example by a proxy); extra headers can be attached with
/// [`SessionConfig::with_header`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionConfig {
    /// API base URL (e.g. `https://akab-xxxx.luna.akamaiapis.net`)
    #[validate(url)]
    pub base_url: String,

    /// Optional account switch key, sent as `accountSwitchKey` on every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_key: Option<String>,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<std::path::PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Headers added to every request
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    crate::client::APPSEC_DEFAULT_TIMEOUT
}

impl SessionConfig {
    /// Create a new session configuration for the given host.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API base URL (e.g., "https://akab-host.luna.akamaiapis.net")
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the account switch key.
    #[must_use]
    pub fn with_account_key(mut self, account_key: impl Into<String>) -> Self {
        self.account_key = Some(account_key.into());
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: std::path::PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse and validate the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        Url::parse(&self.base_url).map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            account_key: None,
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
            headers: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_new() {
        let config = SessionConfig::new("https://akab-host.luna.akamaiapis.net").unwrap();
        assert_eq!(config.base_url, "https://akab-host.luna.akamaiapis.net");
        assert!(config.tls_verify);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.account_key.is_none());
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_session_config_invalid_url() {
        let result = SessionConfig::new("not-a-url");
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::new("https://akab-host.luna.akamaiapis.net")
            .unwrap()
            .with_account_key("1-5C0YLB:1-8BYUX")
            .with_tls_verify(false)
            .with_timeout(60)
            .with_header("X-Request-Source", "appsec-rs");

        assert_eq!(config.account_key.as_deref(), Some("1-5C0YLB:1-8BYUX"));
        assert!(!config.tls_verify);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(
            config.headers.get("X-Request-Source").map(String::as_str),
            Some("appsec-rs")
        );
    }

    #[test]
    fn test_session_config_timeout() {
        let config = SessionConfig::new("https://akab-host.luna.akamaiapis.net")
            .unwrap()
            .with_timeout(45);
        assert_eq!(config.timeout(), Duration::from_secs(45));
    }

    #[test]
    fn test_session_config_parse_base_url() {
        let config = SessionConfig::new("https://akab-host.luna.akamaiapis.net:8443").unwrap();
        let url = config.parse_base_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("akab-host.luna.akamaiapis.net"));
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"base_url": "https://akab-host.luna.akamaiapis.net"}"#)
                .unwrap();
        assert!(config.tls_verify);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_skips_empty() {
        let config = SessionConfig::new("https://akab-host.luna.akamaiapis.net").unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("account_key"));
        assert!(!json.contains("headers"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = SessionConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 301;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 30;
        assert!(config.validate().is_ok());
    }
}
