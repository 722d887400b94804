//! Sberbank Acquiring: REST Client for the Internet-Acquiring Gateway
//!
//! A Rust client for the synchronous payment REST API: order registration,
//! extended status inquiry, authorization reversal, and refund.
//!
//! # What this crate does
//!
//! The gateway speaks a parameter-oriented dialect: every operation is one
//! HTTP call carrying URL-encoded parameters and answering with a JSON
//! object. This crate owns the finicky parts of that exchange:
//!
//! - **Typed requests**: required fields are plain values, optional fields
//!   are `Option`s, and field rules run before anything touches the network
//! - **Parameter assembly**: credentials first, gateway keys verbatim, and
//!   nested option maps collapsed into a single serialized `jsonParams` value
//! - **Endpoint selection**: production and sandbox hosts chosen per client
//!   instance, overridable for reseller installations
//! - **Faithful responses**: the gateway's reply is decoded, never
//!   interpreted; a non-zero `errorCode` is a value to branch on, not an
//!   exception
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   Application    │  checkout and back-office code
//! └────────┬─────────┘
//!          │ typed requests, validated before dispatch
//! ┌────────▼─────────────────────────────────────────┐
//! │          GatewayClient (this crate)              │
//! │  ┌────────────┐   ┌─────────────┐   ┌─────────┐  │
//! │  │ field      │──▶│ parameter   │──▶│ JSON    │  │
//! │  │ validation │   │ assembly    │   │ decode  │  │
//! │  └────────────┘   └─────────────┘   └─────────┘  │
//! └────────┬─────────────────────────────────────────┘
//!          │ HttpTransport (injected; reqwest by default)
//! ┌────────▼─────────┐
//! │   Gateway REST   │  securepayments.sberbank.ru / 3dsec.sberbank.ru
//! └──────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## 1. Register an order and poll its status
//!
//! ```rust,no_run
//! use sberbank_acquiring::{
//!     EndpointMode, GatewayClient, OrderStatusRequest, RegisterOrderRequest,
//! };
//!
//! # async fn example() -> sberbank_acquiring::Result<()> {
//! let client = GatewayClient::builder("merchant-api", "secret")
//!     .mode(EndpointMode::Test)
//!     .build()?;
//!
//! // Register: the gateway assigns an orderId and a payment form URL
//! let order = RegisterOrderRequest::new("shop-451", 125_000, "https://shop.example/return");
//! let reply = client.register_order(&order).await?;
//! println!("pay at {}", reply.form_url.unwrap_or_default());
//!
//! // Later: look the order up by the merchant-assigned number
//! let status = client.order_status(&OrderStatusRequest::by_order_number("shop-451")).await?;
//! println!("state: {:?}", status.order_state());
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Point at a non-standard installation
//!
//! ```rust
//! use sberbank_acquiring::{GatewayClient, TlsPolicy, TransportConfig};
//!
//! # fn main() -> sberbank_acquiring::Result<()> {
//! let client = GatewayClient::builder("merchant-api", "secret")
//!     .base_url("https://gateway-stage.example.com")
//!     .transport_config(TransportConfig {
//!         timeout_secs: 60,
//!         tls: TlsPolicy::Disabled,
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! println!("talking to {}", client.endpoint().base_url());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the [`GatewayClient`], its builder, and credentials
//! - [`request`]: typed operation payloads and their field rules
//! - [`response`]: decoded gateway replies and documented order states
//! - [`endpoint`]: production/sandbox hosts and operation paths
//! - [`transport`]: the injected HTTP seam and its reqwest implementation
//! - [`error`]: the closed error taxonomy with recovery guidance
//!
//! # Security Considerations
//!
//! - **Credentials travel in the POST body**, never in the URL, so they stay
//!   out of proxies and access logs
//! - **`Debug` output redacts the password**; client state can be logged
//! - **TLS policy is explicit**: system store by default,
//!   [`TlsPolicy::Disabled`] and [`TlsPolicy::CustomCa`] for staging mirrors
//!   and private CAs
//! - The client never logs parameter lists; tracing events carry operation
//!   names and URLs only
//!
//! # Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). A gateway business
//! refusal is **not** an `Err`:
//!
//! ```rust
//! use sberbank_acquiring::{Error, GatewayClient, RegisterOrderRequest};
//!
//! # async fn example() {
//! let Ok(client) = GatewayClient::new("merchant-api", "secret") else { return };
//! let order = RegisterOrderRequest::new("shop-451", 125_000, "https://shop.example/return");
//!
//! match client.register_order(&order).await {
//!     Ok(reply) if reply.is_success() => {
//!         println!("form: {}", reply.form_url.unwrap_or_default());
//!     }
//!     Ok(reply) => {
//!         // Business refusal: inspect errorCode, fix the order, resubmit
//!         eprintln!("gateway refused: {:?}", reply.error_code);
//!     }
//!     Err(Error::Validation { field, message }) => {
//!         eprintln!("fix `{field}`: {message}");
//!     }
//!     Err(Error::Transport(e)) => {
//!         // Unknown whether the gateway saw the request; check status first
//!         eprintln!("network failure: {e}");
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod client;
pub mod endpoint;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{ClientBuilder, Credentials, GatewayClient};
pub use endpoint::{Endpoint, EndpointMode, Operation};
pub use error::{Error, Result, TransportError};
pub use request::{
    OrderStatusRequest, PageView, RefundOrderRequest, RegisterOrderRequest, ReverseOrderRequest,
};
pub use response::{GatewayResponse, OrderState};
pub use transport::{
    HttpMethod, HttpTransport, ReqwestTransport, TlsPolicy, TransportConfig, TransportReply,
    TransportResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify public API is accessible
        let _ = std::marker::PhantomData::<Error>;
        let _ = std::marker::PhantomData::<GatewayClient>;
    }
}
