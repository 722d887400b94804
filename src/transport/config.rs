//! Transport configuration types.
//!
//! This module defines the deserializable configuration for the production
//! HTTP transport: timeouts, connection pooling, and the TLS verification
//! policy requested by the integrating application.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Configuration for [`ReqwestTransport`](crate::transport::ReqwestTransport).
///
/// Every field has a default, so an empty document deserializes to the same
/// values as [`TransportConfig::default`].
///
/// # Examples
///
/// ```
/// use sberbank_acquiring::transport::config::TransportConfig;
///
/// let config: TransportConfig = serde_json::from_str(
///     r#"{ "timeout_secs": 60, "tls": "system_default" }"#,
/// )
/// .unwrap();
/// assert_eq!(config.timeout_secs, 60);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    /// Request timeout in seconds, covering the whole exchange.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum idle connections kept per host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// TLS verification policy.
    #[serde(default)]
    pub tls: TlsPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            pool_max_idle_per_host: default_pool_max_idle(),
            tls: TlsPolicy::default(),
        }
    }
}

impl TransportConfig {
    /// Validates configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if timeout values are outside valid
    /// ranges:
    /// - `timeout_secs`: must be 1-300 seconds
    /// - `connect_timeout_secs`: must be 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(Error::Configuration(
                "timeout_secs must be between 1 and 300".to_owned(),
            ));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(Error::Configuration(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the connect timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// TLS certificate verification policy.
///
/// Matches the three deployment situations seen with the gateway: normal
/// public hosts, self-signed staging mirrors, and installations fronted by a
/// private CA.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsPolicy {
    /// Verify against the system trust store.
    #[default]
    SystemDefault,
    /// Accept any certificate. Never use against the production host.
    Disabled,
    /// Verify against the system store plus one PEM certificate file.
    CustomCa(PathBuf),
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_pool_max_idle() -> usize {
    100
}
