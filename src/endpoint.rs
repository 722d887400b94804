//! Gateway endpoint selection.
//!
//! The gateway runs two public installations: the production host that moves
//! real money and a sandbox for integration testing. Which one a client talks
//! to is fixed at construction time and owned by that instance, so clients
//! with different modes coexist in one process.

use url::Url;

use crate::error::{Error, Result};

/// Which gateway installation to address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndpointMode {
    /// Live host serving real payments.
    #[default]
    Production,
    /// Sandbox host for integration testing.
    Test,
}

impl EndpointMode {
    /// Standard base URL of this installation.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://securepayments.sberbank.ru",
            Self::Test => "https://3dsec.sberbank.ru",
        }
    }
}

/// The four gateway operations, each bound to a fixed REST path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Order registration.
    Register,
    /// Extended order status inquiry.
    OrderStatus,
    /// Authorization reversal.
    Reverse,
    /// Refund of a settled payment.
    Refund,
}

impl Operation {
    /// REST path of this operation.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Register => "/payment/rest/register.do",
            Self::OrderStatus => "/payment/rest/getOrderStatusExtended.do",
            Self::Reverse => "/payment/rest/reverse.do",
            Self::Refund => "/payment/rest/refund.do",
        }
    }

    /// Short operation name for logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::OrderStatus => "getOrderStatusExtended",
            Self::Reverse => "reverse",
            Self::Refund => "refund",
        }
    }
}

/// Resolved gateway endpoint owned by a client instance.
///
/// Holds the validated base URL and derives each operation's full URL from it.
/// A base may carry a path prefix (installations behind reverse proxies do),
/// which is preserved in front of the operation paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Resolves the standard host for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] only if the built-in URL fails to
    /// parse, which would be a defect rather than a runtime condition.
    pub fn for_mode(mode: EndpointMode) -> Result<Self> {
        Self::from_base(mode.base_url())
    }

    /// Validates and adopts a caller-supplied base URL.
    ///
    /// Accepts `http`/`https` URLs with a host and no query or fragment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] describing the first rule the URL
    /// breaks.
    pub fn from_base(base: &str) -> Result<Self> {
        let url = Url::parse(base)
            .map_err(|e| Error::Configuration(format!("invalid base URL `{base}`: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "base URL `{base}` must use http or https"
            )));
        }
        if url.host_str().is_none() {
            return Err(Error::Configuration(format!("base URL `{base}` is missing a host")));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(Error::Configuration(format!(
                "base URL `{base}` must not carry a query or fragment"
            )));
        }

        Ok(Self { base: url })
    }

    /// Full URL for one operation.
    #[must_use]
    pub fn url_for(&self, operation: Operation) -> Url {
        let mut url = self.base.clone();
        let prefix = self.base.path().trim_end_matches('/');
        if prefix.is_empty() {
            url.set_path(operation.path());
        } else {
            url.set_path(&format!("{prefix}{}", operation.path()));
        }
        url
    }

    /// The base URL this endpoint addresses.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default_is_production() {
        assert_eq!(EndpointMode::default(), EndpointMode::Production);
    }

    #[test]
    fn test_mode_base_urls() {
        assert_eq!(EndpointMode::Production.base_url(), "https://securepayments.sberbank.ru");
        assert_eq!(EndpointMode::Test.base_url(), "https://3dsec.sberbank.ru");
    }

    #[test]
    fn test_operation_paths() {
        assert_eq!(Operation::Register.path(), "/payment/rest/register.do");
        assert_eq!(Operation::OrderStatus.path(), "/payment/rest/getOrderStatusExtended.do");
        assert_eq!(Operation::Reverse.path(), "/payment/rest/reverse.do");
        assert_eq!(Operation::Refund.path(), "/payment/rest/refund.do");
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::Register.name(), "register");
        assert_eq!(Operation::OrderStatus.name(), "getOrderStatusExtended");
        assert_eq!(Operation::Reverse.name(), "reverse");
        assert_eq!(Operation::Refund.name(), "refund");
    }

    #[test]
    fn test_for_mode_production() {
        let endpoint = Endpoint::for_mode(EndpointMode::Production).unwrap();
        assert_eq!(
            endpoint.url_for(Operation::Register).as_str(),
            "https://securepayments.sberbank.ru/payment/rest/register.do"
        );
    }

    #[test]
    fn test_for_mode_test() {
        let endpoint = Endpoint::for_mode(EndpointMode::Test).unwrap();
        assert_eq!(
            endpoint.url_for(Operation::Refund).as_str(),
            "https://3dsec.sberbank.ru/payment/rest/refund.do"
        );
    }

    #[test]
    fn test_every_operation_shares_the_base() {
        let endpoint = Endpoint::for_mode(EndpointMode::Test).unwrap();
        for operation in
            [Operation::Register, Operation::OrderStatus, Operation::Reverse, Operation::Refund]
        {
            let url = endpoint.url_for(operation);
            assert_eq!(url.host_str(), Some("3dsec.sberbank.ru"));
            assert_eq!(url.path(), operation.path());
        }
    }

    #[test]
    fn test_custom_base_with_port() {
        let endpoint = Endpoint::from_base("http://localhost:8443").unwrap();
        assert_eq!(
            endpoint.url_for(Operation::OrderStatus).as_str(),
            "http://localhost:8443/payment/rest/getOrderStatusExtended.do"
        );
    }

    #[test]
    fn test_custom_base_with_path_prefix() {
        let endpoint = Endpoint::from_base("https://gateway.example.com/acquiring").unwrap();
        assert_eq!(
            endpoint.url_for(Operation::Register).as_str(),
            "https://gateway.example.com/acquiring/payment/rest/register.do"
        );
    }

    #[test]
    fn test_trailing_slash_does_not_double() {
        let endpoint = Endpoint::from_base("https://gateway.example.com/acquiring/").unwrap();
        assert_eq!(
            endpoint.url_for(Operation::Register).as_str(),
            "https://gateway.example.com/acquiring/payment/rest/register.do"
        );
    }

    #[test]
    fn test_bare_host_trailing_slash() {
        let endpoint = Endpoint::from_base("https://3dsec.sberbank.ru/").unwrap();
        assert_eq!(
            endpoint.url_for(Operation::Reverse).as_str(),
            "https://3dsec.sberbank.ru/payment/rest/reverse.do"
        );
    }

    #[test]
    fn test_rejects_unparseable_base() {
        let err = Endpoint::from_base("not a url").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = Endpoint::from_base("ftp://gateway.example.com").unwrap_err();
        assert!(err.to_string().contains("must use http or https"));
    }

    #[test]
    fn test_rejects_missing_host() {
        let err = Endpoint::from_base("https:///payment").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_rejects_query() {
        let err = Endpoint::from_base("https://gateway.example.com?lang=ru").unwrap_err();
        assert!(err.to_string().contains("query or fragment"));
    }

    #[test]
    fn test_base_url_accessor() {
        let endpoint = Endpoint::from_base("https://gateway.example.com/acquiring").unwrap();
        assert_eq!(endpoint.base_url(), "https://gateway.example.com/acquiring");
    }
}
