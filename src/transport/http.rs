//! Production HTTP transport backed by reqwest.
//!
//! This module provides the default [`HttpTransport`] implementation with
//! connection pooling, timeouts, and the three TLS verification policies the
//! gateway deployments call for.

use std::{fs, sync::LazyLock, time::Duration};

use reqwest::{Certificate, Client};
use tracing::{debug, instrument, warn};
use url::Url;

use super::{
    HttpMethod, HttpTransport, TransportReply, TransportResult,
    config::{TlsPolicy, TransportConfig},
};
use crate::error::{Error, Result, TransportError};

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per transport instance,
/// preserving connection pooling benefits across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(100)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("failed to create default HTTP client")
});

/// HTTP transport using reqwest.
///
/// Cheap to clone: the inner client is reference-counted, and clones share its
/// connection pool. Parameters travel exactly as assembled by the caller and
/// are never logged, since the list carries the merchant password.
///
/// # Examples
///
/// ```
/// use sberbank_acquiring::transport::{ReqwestTransport, TlsPolicy, TransportConfig};
///
/// let transport = ReqwestTransport::new().unwrap();
///
/// let staging = ReqwestTransport::with_config(&TransportConfig {
///     timeout_secs: 60,
///     tls: TlsPolicy::Disabled,
///     ..Default::default()
/// })
/// .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// Uses a shared singleton client for connection pooling efficiency.
    ///
    /// Default configuration:
    /// - Pool max idle per host: 100
    /// - Timeout: 30 seconds
    /// - Connect timeout: 10 seconds
    /// - TLS: system trust store
    ///
    /// # Errors
    ///
    /// This method is infallible but returns `Result` for API consistency
    /// with [`ReqwestTransport::with_config`].
    pub fn new() -> Result<Self> {
        Ok(Self { client: DEFAULT_HTTP_CLIENT.clone() })
    }

    /// Creates a transport from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the configuration is out of
    /// bounds, if a [`TlsPolicy::CustomCa`] file cannot be read or is not
    /// valid PEM, or if the HTTP client cannot be built.
    pub fn with_config(config: &TransportConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        builder = match &config.tls {
            TlsPolicy::SystemDefault => builder,
            TlsPolicy::Disabled => builder.danger_accept_invalid_certs(true),
            TlsPolicy::CustomCa(path) => {
                let pem = fs::read(path).map_err(|e| {
                    Error::Configuration(format!(
                        "cannot read CA certificate {}: {e}",
                        path.display()
                    ))
                })?;
                let certificate = Certificate::from_pem(&pem).map_err(|e| {
                    Error::Configuration(format!(
                        "CA certificate {} is not valid PEM: {e}",
                        path.display()
                    ))
                })?;
                builder.add_root_certificate(certificate)
            }
        };

        let client = builder
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    #[instrument(
        skip_all,
        fields(method = method.as_str(), url = %url, param_count = params.len())
    )]
    async fn execute(
        &self,
        method: HttpMethod,
        url: &Url,
        params: &[(String, String)],
    ) -> TransportResult {
        debug!("dispatching gateway request");

        let request = match method {
            HttpMethod::Get => self.client.get(url.clone()).query(params),
            HttpMethod::Post => self.client.post(url.clone()).form(params),
        };

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "gateway request failed");
            TransportError::from(e)
        })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            warn!(status, "gateway returned non-success HTTP status");
        }

        let body = response.bytes().await.map_err(TransportError::from)?.to_vec();
        debug!(status, body_len = body.len(), "gateway reply received");

        Ok(TransportReply { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a Url,
        params: &'a [(String, String)],
    ) -> TransportResult {
        self.execute(method, url, params).await
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_new() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[test]
    fn test_with_default_config() {
        assert!(ReqwestTransport::with_config(&TransportConfig::default()).is_ok());
    }

    #[test]
    fn test_with_custom_timeouts() {
        let config = TransportConfig {
            timeout_secs: 60,
            connect_timeout_secs: 15,
            pool_max_idle_per_host: 20,
            tls: TlsPolicy::SystemDefault,
        };
        assert!(ReqwestTransport::with_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_out_of_bounds_config() {
        let config = TransportConfig { timeout_secs: 0, ..Default::default() };
        let err = ReqwestTransport::with_config(&config).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_tls_disabled_builds() {
        let config = TransportConfig { tls: TlsPolicy::Disabled, ..Default::default() };
        assert!(ReqwestTransport::with_config(&config).is_ok());
    }

    #[test]
    fn test_custom_ca_missing_file() {
        let config = TransportConfig {
            tls: TlsPolicy::CustomCa("/nonexistent/gateway-ca.pem".into()),
            ..Default::default()
        };
        let err = ReqwestTransport::with_config(&config).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("cannot read CA certificate"));
    }

    #[test]
    fn test_custom_ca_invalid_pem() {
        let path = std::env::temp_dir().join(format!("invalid-ca-{}.pem", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"this is not a certificate").unwrap();
        drop(file);

        let config =
            TransportConfig { tls: TlsPolicy::CustomCa(path.clone()), ..Default::default() };
        let err = ReqwestTransport::with_config(&config).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_clone_shares_pool() {
        let transport = ReqwestTransport::new().unwrap();
        let _clone = transport.clone();
    }
}
