//! Error types for gateway client operations.
//!
//! This module defines every error the client can produce. All errors implement
//! the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Configuration** ([`Error::Configuration`]): the client cannot be built
//! - **Validation** ([`Error::Validation`]): a request fails field rules before any network call
//! - **Transport** ([`Error::Transport`]): the HTTP exchange itself fails
//! - **Decode** ([`Error::Decode`]): the gateway reply is not parseable JSON
//!
//! A gateway-reported business error (`errorCode != 0` inside a well-formed
//! reply) is deliberately **not** in this taxonomy: it is a normal
//! [`GatewayResponse`](crate::response::GatewayResponse) the caller inspects.
//!
//! # Examples
//!
//! ```
//! use sberbank_acquiring::error::{Error, Result};
//!
//! fn check_amount(amount: u64) -> Result<u64> {
//!     if amount == 0 {
//!         return Err(Error::validation("amount", "must be a positive number of minor units"));
//!     }
//!     Ok(amount)
//! }
//! ```

use thiserror::Error;

/// Result type alias for gateway client operations.
///
/// This is a convenience type that uses [`Error`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building the client or calling the gateway.
///
/// The set is closed on purpose: callers branch on these four kinds
/// programmatically instead of parsing message text.
///
/// # Error Recovery
///
/// - **Fatal** ([`Configuration`](Self::Configuration)): fix credentials, base
///   URL, or TLS material; retrying cannot help
/// - **Caller input** ([`Validation`](Self::Validation)): correct the named
///   request field and resubmit
/// - **Transient** ([`Transport`](Self::Transport)): the client never retries;
///   apply your own retry policy
/// - **Gateway contract** ([`Decode`](Self::Decode)): the reply was not JSON;
///   usually an outage page or a proxy interfering
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum Error {
    /// Client construction was given unusable configuration.
    ///
    /// Raised for an empty login or password, an unparseable base URL, or a
    /// TLS certificate path that cannot be read as PEM. Surfaced immediately
    /// at build time; no operation method raises it.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A request field is missing or malformed.
    ///
    /// `field` names the gateway parameter in its documented form
    /// (`orderNumber`, `returnUrl`, `extraParams`, ...). Raised before any
    /// network call is attempted; a request that fails validation never
    /// reaches the transport.
    ///
    /// # Recovery
    ///
    /// Correct the named field and resubmit. Nothing was sent to the gateway.
    #[error("invalid value for `{field}`: {message}")]
    Validation {
        /// Gateway parameter name of the offending field.
        field: &'static str,
        /// What the field rule expected.
        message: String,
    },

    /// The HTTP exchange with the gateway failed.
    ///
    /// Wraps a [`TransportError`] from the transport implementation: timeouts,
    /// connection refusals, DNS failures, TLS handshake failures. The client
    /// performs no retries; retry policy belongs to the caller.
    ///
    /// # Recovery
    ///
    /// Whether the gateway received the request is unknown. For registration
    /// the safe recovery is a status inquiry by `orderNumber` before
    /// re-registering.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The gateway reply body was not parseable JSON.
    ///
    /// The gateway answers every accepted request (business failures
    /// included) with a JSON object, so a non-JSON or empty body means the
    /// request never reached the payment REST layer (maintenance page,
    /// proxy error).
    #[error("could not decode gateway reply: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Builds an [`Error::Validation`] naming the offending gateway parameter.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }

    /// Gateway parameter name carried by a validation error, if this is one.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Network-level failure raised by an [`HttpTransport`](crate::transport::HttpTransport)
/// implementation.
///
/// Kept separate from [`Error`] so transport implementations, test fakes
/// included, can construct failures without depending on any HTTP stack. The
/// production transport converts [`reqwest::Error`] into this type.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error from a bare message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    /// Creates a transport error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self { message: message.into(), source: Some(Box::new(source)) }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_configuration_display() {
        let error = Error::Configuration("login must not be empty".to_owned());
        assert_eq!(error.to_string(), "configuration error: login must not be empty");
    }

    #[test]
    fn test_validation_display_names_field() {
        let error = Error::validation("orderNumber", "must not be empty");
        assert_eq!(error.to_string(), "invalid value for `orderNumber`: must not be empty");
    }

    #[test]
    fn test_field_accessor() {
        let error = Error::validation("returnUrl", "must be an absolute URL");
        assert_eq!(error.field(), Some("returnUrl"));

        let error = Error::Configuration("bad".to_owned());
        assert_eq!(error.field(), None);
    }

    #[test]
    fn test_transport_error_display() {
        let error = TransportError::new("connection refused");
        assert_eq!(error.to_string(), "connection refused");
    }

    #[test]
    fn test_transport_error_carries_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let error = TransportError::with_source("request timed out", io);
        assert!(error.source().is_some());
        assert_eq!(error.to_string(), "request timed out");
    }

    #[test]
    fn test_transport_error_converts_into_error() {
        let error: Error = TransportError::new("dns failure").into();
        assert!(matches!(error, Error::Transport(_)));
        assert!(error.to_string().contains("dns failure"));
    }

    #[test]
    fn test_decode_error_from_serde() {
        let cause =
            serde_json::from_str::<serde_json::Value>("not json").expect_err("must not parse");
        let error: Error = cause.into();
        assert!(matches!(error, Error::Decode(_)));
        assert!(error.to_string().starts_with("could not decode gateway reply"));
    }
}
