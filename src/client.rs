//! The gateway client.
//!
//! [`GatewayClient`] is the single authenticated entry point for the four
//! gateway operations. Every operation follows one shape: validate the typed
//! request, assemble the parameter list starting with the credentials,
//! dispatch through the injected transport, and decode the JSON reply.
//!
//! The client is stateless between calls and safe to share across tasks; the
//! credentials and resolved endpoint are immutable after construction.

use std::fmt;

use tracing::{debug, instrument};

use crate::{
    endpoint::{Endpoint, EndpointMode, Operation},
    error::{Error, Result},
    request::{
        OrderStatusRequest, RefundOrderRequest, RegisterOrderRequest, ReverseOrderRequest,
    },
    response::GatewayResponse,
    transport::{HttpMethod, HttpTransport, ReqwestTransport, TransportConfig},
};

/// Merchant credentials presented with every gateway call.
///
/// Both parts are required and non-empty. The password is redacted from
/// `Debug` output so client state can be logged safely.
#[derive(Clone)]
pub struct Credentials {
    login: String,
    password: String,
}

impl Credentials {
    /// Validates and adopts a login/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if either part is empty.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let login = login.into();
        let password = password.into();
        if login.trim().is_empty() {
            return Err(Error::Configuration("login must not be empty".to_owned()));
        }
        if password.trim().is_empty() {
            return Err(Error::Configuration("password must not be empty".to_owned()));
        }
        Ok(Self { login, password })
    }

    /// The merchant API login.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Builder for [`GatewayClient`].
///
/// Obtained from [`GatewayClient::builder`]. Mode defaults to
/// [`EndpointMode::Production`]; a custom base URL overrides the mode's
/// standard host entirely.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    login: String,
    password: String,
    mode: EndpointMode,
    base_url: Option<String>,
    transport_config: Option<TransportConfig>,
}

impl ClientBuilder {
    fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            mode: EndpointMode::default(),
            base_url: None,
            transport_config: None,
        }
    }

    /// Selects the gateway installation to address.
    #[must_use]
    pub fn mode(mut self, mode: EndpointMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides both standard hosts with a custom base URL.
    ///
    /// Useful for reseller installations and local gateway stubs. The URL is
    /// validated at [`build`](Self::build) time.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Configures the production transport built by [`build`](Self::build).
    ///
    /// Ignored by [`build_with`](Self::build_with), where the caller supplies
    /// the transport ready-made.
    #[must_use]
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport_config = Some(config);
        self
    }

    /// Builds the client with the production [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for empty credentials, an invalid
    /// base URL, or a transport configuration that cannot be realized.
    pub fn build(mut self) -> Result<GatewayClient<ReqwestTransport>> {
        let transport = match self.transport_config.take() {
            Some(config) => ReqwestTransport::with_config(&config)?,
            None => ReqwestTransport::new()?,
        };
        self.build_with(transport)
    }

    /// Builds the client with a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for empty credentials or an invalid
    /// base URL.
    pub fn build_with<T: HttpTransport>(self, transport: T) -> Result<GatewayClient<T>> {
        let credentials = Credentials::new(self.login, self.password)?;
        let endpoint = match &self.base_url {
            Some(base) => Endpoint::from_base(base)?,
            None => Endpoint::for_mode(self.mode)?,
        };
        Ok(GatewayClient { credentials, endpoint, transport })
    }
}

/// Authenticated entry point for the four gateway operations.
///
/// Holds the merchant credentials, the resolved endpoint, and the injected
/// transport. All operation methods take `&self` and may run concurrently.
///
/// # Examples
///
/// ```no_run
/// use sberbank_acquiring::{EndpointMode, GatewayClient, RegisterOrderRequest};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GatewayClient::builder("merchant-api", "secret")
///     .mode(EndpointMode::Test)
///     .build()?;
///
/// let order = RegisterOrderRequest::new("shop-451", 125_000, "https://shop.example/return");
/// let reply = client.register_order(&order).await?;
/// if reply.is_success() {
///     println!("pay at {}", reply.form_url.unwrap_or_default());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GatewayClient<T: HttpTransport = ReqwestTransport> {
    credentials: Credentials,
    endpoint: Endpoint,
    transport: T,
}

impl GatewayClient {
    /// Production-mode client with the default transport.
    ///
    /// Shorthand for `GatewayClient::builder(login, password).build()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if either credential is empty.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::builder(login, password).build()
    }

    /// Starts building a client.
    pub fn builder(login: impl Into<String>, password: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(login, password)
    }
}

impl<T: HttpTransport> GatewayClient<T> {
    /// The endpoint this client addresses.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The injected transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Registers a new order.
    ///
    /// On acceptance the reply carries `order_id` and `form_url`. A non-zero
    /// `error_code` (say, a duplicate `orderNumber`) is still an `Ok` value;
    /// branch with [`GatewayResponse::is_success`].
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] before any network call for broken field rules,
    /// [`Error::Transport`] for network failures, [`Error::Decode`] for a
    /// non-JSON reply.
    #[instrument(skip_all, fields(order_number = %request.order_number))]
    pub async fn register_order(&self, request: &RegisterOrderRequest) -> Result<GatewayResponse> {
        request.validate()?;
        self.execute(Operation::Register, request.params()?).await
    }

    /// Looks up the extended status of an order.
    ///
    /// The request carries the gateway `orderId`, the merchant `orderNumber`,
    /// or both. The reply's `order_status` stays raw;
    /// [`GatewayResponse::order_state`] reads the documented codes.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if neither identifier is present,
    /// [`Error::Transport`] and [`Error::Decode`] as for every operation.
    #[instrument(
        skip_all,
        fields(order_id = ?request.order_id, order_number = ?request.order_number)
    )]
    pub async fn order_status(&self, request: &OrderStatusRequest) -> Result<GatewayResponse> {
        request.validate()?;
        self.execute(Operation::OrderStatus, request.params()).await
    }

    /// Reverses an authorization hold before settlement.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] before any network call for broken field rules,
    /// [`Error::Transport`] for network failures, [`Error::Decode`] for a
    /// non-JSON reply.
    #[instrument(skip_all, fields(order_id = %request.order_id, amount = request.amount))]
    pub async fn reverse_order(&self, request: &ReverseOrderRequest) -> Result<GatewayResponse> {
        request.validate()?;
        self.execute(Operation::Reverse, request.params()?).await
    }

    /// Refunds a settled payment.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] before any network call for broken field rules,
    /// [`Error::Transport`] for network failures, [`Error::Decode`] for a
    /// non-JSON reply.
    #[instrument(skip_all, fields(order_id = %request.order_id, amount = request.amount))]
    pub async fn refund_order(&self, request: &RefundOrderRequest) -> Result<GatewayResponse> {
        request.validate()?;
        self.execute(Operation::Refund, request.params()?).await
    }

    /// Shared dispatch path: prepend credentials, send, decode.
    async fn execute(
        &self,
        operation: Operation,
        operation_params: Vec<(String, String)>,
    ) -> Result<GatewayResponse> {
        let mut params = Vec::with_capacity(operation_params.len() + 2);
        params.push(("userName".to_owned(), self.credentials.login().to_owned()));
        params.push(("password".to_owned(), self.credentials.password().to_owned()));
        params.extend(operation_params);

        let url = self.endpoint.url_for(operation);
        debug!(operation = operation.name(), url = %url, "calling gateway");

        let reply = self.transport.send(HttpMethod::Post, &url, &params).await?;
        let response: GatewayResponse = serde_json::from_slice(&reply.body)?;

        if !response.is_success() {
            debug!(
                operation = operation.name(),
                error_code = ?response.error_code,
                "gateway reported a business error"
            );
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::{
        response::OrderState,
        transport::{TransportReply, TransportResult},
    };

    #[derive(Debug)]
    struct CannedTransport(&'static str);

    impl HttpTransport for CannedTransport {
        async fn send<'a>(
            &'a self,
            _method: HttpMethod,
            _url: &'a Url,
            _params: &'a [(String, String)],
        ) -> TransportResult {
            Ok(TransportReply { status: 200, body: self.0.as_bytes().to_vec() })
        }
    }

    #[test]
    fn test_credentials_reject_empty_login() {
        let err = Credentials::new("", "secret").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("login"));
    }

    #[test]
    fn test_credentials_reject_blank_password() {
        let err = Credentials::new("merchant-api", "   ").unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("merchant-api", "secret").unwrap();
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("merchant-api"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_builder_rejects_empty_credentials() {
        let result = GatewayClient::builder("", "secret").build_with(CannedTransport("{}"));
        assert!(matches!(result.unwrap_err(), Error::Configuration(_)));
    }

    #[test]
    fn test_builder_defaults_to_production() {
        let client = GatewayClient::builder("merchant-api", "secret")
            .build_with(CannedTransport("{}"))
            .unwrap();
        assert_eq!(client.endpoint().base_url(), "https://securepayments.sberbank.ru/");
    }

    #[test]
    fn test_builder_test_mode() {
        let client = GatewayClient::builder("merchant-api", "secret")
            .mode(EndpointMode::Test)
            .build_with(CannedTransport("{}"))
            .unwrap();
        assert_eq!(client.endpoint().base_url(), "https://3dsec.sberbank.ru/");
    }

    #[test]
    fn test_builder_custom_base_url_overrides_mode() {
        let client = GatewayClient::builder("merchant-api", "secret")
            .mode(EndpointMode::Test)
            .base_url("https://gateway.example.com/acquiring")
            .build_with(CannedTransport("{}"))
            .unwrap();
        assert_eq!(client.endpoint().base_url(), "https://gateway.example.com/acquiring");
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        let result = GatewayClient::builder("merchant-api", "secret")
            .base_url("ftp://gateway.example.com")
            .build_with(CannedTransport("{}"));
        assert!(matches!(result.unwrap_err(), Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_status_round_trip_through_fake() {
        let client = GatewayClient::builder("merchant-api", "secret")
            .mode(EndpointMode::Test)
            .build_with(CannedTransport(r#"{"errorCode":0,"orderStatus":2}"#))
            .unwrap();

        let reply = client
            .order_status(&OrderStatusRequest::by_order_id("gw-123"))
            .await
            .unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.order_state(), Some(OrderState::Deposited));
    }

    #[tokio::test]
    async fn test_validation_failure_is_not_dispatched() {
        let client = GatewayClient::builder("merchant-api", "secret")
            .build_with(CannedTransport("{}"))
            .unwrap();

        let err = client.order_status(&OrderStatusRequest::default()).await.unwrap_err();
        assert_eq!(err.field(), Some("orderId"));
    }
}
