//! Transport seam between the gateway client and the HTTP stack.
//!
//! The client never talks to the network directly: every exchange goes through
//! an [`HttpTransport`] implementation chosen at construction time. Production
//! code uses [`ReqwestTransport`]; tests substitute in-process fakes that
//! record the request and reply from a script.
//!
//! # Architecture
//!
//! The transport layer separates protocol mechanics from request semantics:
//! - **`HttpTransport`**: carries an already-assembled parameter list to a URL
//! - **`GatewayClient`**: owns validation, parameter assembly, and decoding
//!
//! A transport never inspects or reorders parameters and never interprets the
//! reply body; it reports exactly what the wire said.
//!
//! # Examples
//!
//! A canned transport for tests:
//!
//! ```
//! use sberbank_acquiring::transport::{HttpMethod, HttpTransport, TransportReply, TransportResult};
//! use url::Url;
//!
//! #[derive(Debug)]
//! struct CannedTransport;
//!
//! impl HttpTransport for CannedTransport {
//!     async fn send<'a>(
//!         &'a self,
//!         _method: HttpMethod,
//!         _url: &'a Url,
//!         _params: &'a [(String, String)],
//!     ) -> TransportResult {
//!         Ok(TransportReply { status: 200, body: br#"{"errorCode":0}"#.to_vec() })
//!     }
//! }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use url::Url;

use crate::error::TransportError;

pub mod config;
pub mod http;

pub use config::{TlsPolicy, TransportConfig};
pub use http::ReqwestTransport;

/// Result of a single transport exchange.
///
/// Errors here are strictly network-level; a gateway business error is a
/// successful exchange carrying an `errorCode` in the body.
pub type TransportResult = std::result::Result<TransportReply, TransportError>;

/// What the wire said: HTTP status and raw body bytes.
///
/// The body is not interpreted by the transport;
/// [`GatewayClient`](crate::client::GatewayClient) decodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

/// HTTP method used for an exchange.
///
/// The gateway accepts both forms; the client always sends [`HttpMethod::Post`]
/// so credentials stay out of URLs. The method still travels through the seam,
/// keeping transports honest about parameter encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Parameters encoded into the URL query string.
    Get,
    /// Parameters encoded as a form-urlencoded body.
    Post,
}

impl HttpMethod {
    /// Wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One HTTP exchange with the gateway.
///
/// Implementations must be shareable across tasks (`Send + Sync`) because a
/// single client instance serves concurrent callers. The trait is open:
/// integrators supply their own implementation to swap the HTTP stack or to
/// fake the gateway in tests.
///
/// # Contract
///
/// - Encode `params` per `method` (GET → query string, POST → form body)
///   without reordering or deduplicating pairs
/// - Report the status and body verbatim, even for non-2xx statuses
/// - Fail with [`TransportError`] only for network-level problems
pub trait HttpTransport: Send + Sync {
    /// Sends one request and returns the raw reply.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the exchange fails below the HTTP
    /// application layer: DNS, connect, TLS, timeout, or body read failures.
    fn send<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a Url,
        params: &'a [(String, String)],
    ) -> impl Future<Output = TransportResult> + Send + 'a;
}
