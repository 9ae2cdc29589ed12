//! Server configuration for cardgen-srv.

use cardgen_core::types::{DEFAULT_ISO_AMOUNT, DEFAULT_ISO_CURRENCY};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use crate::SrvError;

/// Configuration for the fixture server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// TCP listen address (default: 0.0.0.0:8080).
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Bearer token for protected endpoints. Required to start.
    #[serde(default)]
    pub token: String,

    /// Requests allowed per client IP per minute.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,

    /// Largest `count` accepted by `/v1/cards`.
    #[serde(default = "default_max_cards")]
    pub max_cards_per_request: usize,

    /// Cards returned when `count` is missing or out of range.
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Transaction amount for generated ISO fields, in minor units.
    #[serde(default = "default_iso_amount")]
    pub iso_amount: i64,

    /// ISO 4217 numeric currency for generated ISO fields.
    #[serde(default = "default_iso_currency")]
    pub iso_currency: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            token: String::new(),
            rate_limit_per_minute: default_rate_limit(),
            max_cards_per_request: default_max_cards(),
            default_count: default_count(),
            iso_amount: default_iso_amount(),
            iso_currency: default_iso_currency(),
        }
    }
}

impl ServerConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| SrvError::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Replace the listen port, keeping the address.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.listen = SocketAddr::new(self.listen.ip(), port);
        self
    }

    /// Replace the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Check the settings the server cannot run without.
    pub fn validate(&self) -> crate::Result<()> {
        if self.token.is_empty() {
            return Err(SrvError::Config("a bearer token is required".into()));
        }
        if self.rate_limit_per_minute == 0 {
            return Err(SrvError::Config(
                "rate_limit_per_minute must be at least 1".into(),
            ));
        }
        if self.max_cards_per_request == 0 {
            return Err(SrvError::Config(
                "max_cards_per_request must be at least 1".into(),
            ));
        }
        if !(1..=self.max_cards_per_request).contains(&self.default_count) {
            return Err(SrvError::Config(format!(
                "default_count must be between 1 and {}",
                self.max_cards_per_request
            )));
        }
        Ok(())
    }
}

// Default value functions for serde.
const fn default_listen() -> SocketAddr {
    SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080)
}

const fn default_rate_limit() -> u32 {
    100
}

const fn default_max_cards() -> usize {
    100
}

const fn default_count() -> usize {
    10
}

const fn default_iso_amount() -> i64 {
    DEFAULT_ISO_AMOUNT
}

fn default_iso_currency() -> String {
    String::from(DEFAULT_ISO_CURRENCY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.listen.port(), 8080);
        assert_eq!(config.rate_limit_per_minute, 100);
        assert_eq!(config.max_cards_per_request, 100);
        assert_eq!(config.default_count, 10);
        assert_eq!(config.iso_amount, 10_000);
        assert_eq!(config.iso_currency, "986");
        assert!(config.token.is_empty());
    }

    #[test]
    fn test_validate_requires_token() {
        let config = ServerConfig::default();
        assert!(matches!(config.validate(), Err(SrvError::Config(_))));
        assert!(config.with_token("dev").validate().is_ok());
    }

    #[test]
    fn test_validate_limits() {
        let mut config = ServerConfig::default().with_token("dev");
        config.default_count = 101;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default().with_token("dev");
        config.rate_limit_per_minute = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_port_keeps_address() {
        let config = ServerConfig::default().with_port(9090);
        assert_eq!(config.listen.to_string(), "0.0.0.0:9090");
    }

    #[test]
    fn test_load_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("srv.toml");
        std::fs::write(
            &path,
            "listen = \"127.0.0.1:3000\"\ntoken = \"abc\"\nrate_limit_per_minute = 5\n",
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.listen.port(), 3000);
        assert_eq!(config.token, "abc");
        assert_eq!(config.rate_limit_per_minute, 5);
        assert_eq!(config.default_count, 10);
        assert_eq!(config.iso_currency, "986");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "listen = 42").unwrap();
        assert!(matches!(ServerConfig::load(&path), Err(SrvError::Config(_))));
    }
}
