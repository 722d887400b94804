//! Typed operation requests and their field rules.
//!
//! Each gateway operation has its own request struct whose required fields are
//! plain values and whose optional fields are `Option`s. `validate()` applies
//! the per-operation rules and names the offending gateway parameter on
//! failure; nothing is sent to the network until validation passes.
//!
//! Parameter assembly is deterministic: required fields first, then each
//! present optional field under its gateway key, with `extra_params` collapsed
//! into a single serialized `jsonParams` value. Credentials are prepended by
//! the client, not here.

use std::num::NonZeroU32;

use serde_json::{Map, Value};
use url::Url;

use crate::error::{Error, Result};

/// Payment page layout hint forwarded to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    /// Full desktop payment page.
    Desktop,
    /// Mobile-optimized payment page.
    Mobile,
}

impl PageView {
    /// Wire value of the `pageView` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "DESKTOP",
            Self::Mobile => "MOBILE",
        }
    }
}

/// Order registration payload for `register.do`.
///
/// Required fields are `order_number`, `amount`, and `return_url`; everything
/// else is optional and omitted from the wire when `None`.
///
/// # Examples
///
/// ```
/// use sberbank_acquiring::request::RegisterOrderRequest;
///
/// let order = RegisterOrderRequest {
///     language: Some("ru".to_owned()),
///     ..RegisterOrderRequest::new("shop-451", 125_000, "https://shop.example/return")
/// };
/// assert!(order.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegisterOrderRequest {
    /// Merchant-assigned order number, unique within the merchant account.
    pub order_number: String,
    /// Payment amount in minor currency units.
    pub amount: u64,
    /// Absolute URL the payer returns to after successful payment.
    pub return_url: String,
    /// Absolute URL for failed payment returns.
    pub fail_url: Option<String>,
    /// ISO 4217 numeric currency code, sent in its three-digit form.
    pub currency: Option<u16>,
    /// ISO 639-1 language code for the payment page.
    pub language: Option<String>,
    /// Payment page layout hint.
    pub page_view: Option<PageView>,
    /// Session lifetime in seconds.
    pub session_timeout_secs: Option<NonZeroU32>,
    /// Additional gateway parameters, sent as one serialized `jsonParams`
    /// value and never expanded into top-level parameters.
    pub extra_params: Option<Map<String, Value>>,
}

impl RegisterOrderRequest {
    /// Creates a registration request from the three required fields.
    #[must_use]
    pub fn new(
        order_number: impl Into<String>,
        amount: u64,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            order_number: order_number.into(),
            amount,
            return_url: return_url.into(),
            ..Self::default()
        }
    }

    /// Checks the field rules for `register.do`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first gateway parameter that
    /// breaks its rule.
    pub fn validate(&self) -> Result<()> {
        validate_required_text("orderNumber", &self.order_number)?;
        validate_amount(self.amount)?;
        validate_absolute_url("returnUrl", &self.return_url)?;
        if let Some(fail_url) = &self.fail_url {
            validate_absolute_url("failUrl", fail_url)?;
        }
        if let Some(currency) = self.currency {
            validate_currency(currency)?;
        }
        if let Some(language) = &self.language {
            validate_language(language)?;
        }
        Ok(())
    }

    pub(crate) fn params(&self) -> Result<Vec<(String, String)>> {
        let mut params = vec![
            ("orderNumber".to_owned(), self.order_number.clone()),
            ("amount".to_owned(), self.amount.to_string()),
            ("returnUrl".to_owned(), self.return_url.clone()),
        ];
        if let Some(fail_url) = &self.fail_url {
            params.push(("failUrl".to_owned(), fail_url.clone()));
        }
        if let Some(currency) = self.currency {
            params.push(("currency".to_owned(), format!("{currency:03}")));
        }
        if let Some(language) = &self.language {
            params.push(("language".to_owned(), language.clone()));
        }
        if let Some(page_view) = self.page_view {
            params.push(("pageView".to_owned(), page_view.as_str().to_owned()));
        }
        if let Some(timeout) = self.session_timeout_secs {
            params.push(("sessionTimeoutSecs".to_owned(), timeout.to_string()));
        }
        if let Some(extra) = &self.extra_params {
            params.push(("jsonParams".to_owned(), encode_extra_params(extra)?));
        }
        Ok(params)
    }
}

/// Status inquiry payload for `getOrderStatusExtended.do`.
///
/// The gateway looks an order up by its own `orderId` or by the merchant's
/// `orderNumber`; at least one must be given. When both are set, both are
/// forwarded untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderStatusRequest {
    /// Gateway-assigned order identifier.
    pub order_id: Option<String>,
    /// Merchant-assigned order number.
    pub order_number: Option<String>,
    /// ISO 639-1 language code for localized status text.
    pub language: Option<String>,
}

impl OrderStatusRequest {
    /// Inquiry by the gateway-assigned identifier.
    #[must_use]
    pub fn by_order_id(order_id: impl Into<String>) -> Self {
        Self { order_id: Some(order_id.into()), ..Self::default() }
    }

    /// Inquiry by the merchant-assigned order number.
    #[must_use]
    pub fn by_order_number(order_number: impl Into<String>) -> Self {
        Self { order_number: Some(order_number.into()), ..Self::default() }
    }

    /// Checks the field rules for `getOrderStatusExtended.do`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if neither identifier is present or the
    /// language code is malformed.
    pub fn validate(&self) -> Result<()> {
        if !has_text(self.order_id.as_deref()) && !has_text(self.order_number.as_deref()) {
            return Err(Error::validation(
                "orderId",
                "either orderId or orderNumber must be provided",
            ));
        }
        if let Some(language) = &self.language {
            validate_language(language)?;
        }
        Ok(())
    }

    pub(crate) fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(order_id) = &self.order_id {
            params.push(("orderId".to_owned(), order_id.clone()));
        }
        if let Some(order_number) = &self.order_number {
            params.push(("orderNumber".to_owned(), order_number.clone()));
        }
        if let Some(language) = &self.language {
            params.push(("language".to_owned(), language.clone()));
        }
        params
    }
}

/// Authorization reversal payload for `reverse.do`.
///
/// The gateway treats an omitted amount as a full reversal, but this client
/// requires it explicitly so a partial reversal is never issued by accident.
#[derive(Debug, Clone, Default)]
pub struct ReverseOrderRequest {
    /// Gateway-assigned order identifier.
    pub order_id: String,
    /// Amount to reverse in minor currency units.
    pub amount: u64,
    /// ISO 639-1 language code for localized error text.
    pub language: Option<String>,
    /// Additional gateway parameters, sent as one serialized `jsonParams` value.
    pub extra_params: Option<Map<String, Value>>,
}

impl ReverseOrderRequest {
    /// Creates a reversal request from the required fields.
    #[must_use]
    pub fn new(order_id: impl Into<String>, amount: u64) -> Self {
        Self { order_id: order_id.into(), amount, ..Self::default() }
    }

    /// Checks the field rules for `reverse.do`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first gateway parameter that
    /// breaks its rule.
    pub fn validate(&self) -> Result<()> {
        validate_required_text("orderId", &self.order_id)?;
        validate_amount(self.amount)?;
        if let Some(language) = &self.language {
            validate_language(language)?;
        }
        Ok(())
    }

    pub(crate) fn params(&self) -> Result<Vec<(String, String)>> {
        let mut params = vec![
            ("orderId".to_owned(), self.order_id.clone()),
            ("amount".to_owned(), self.amount.to_string()),
        ];
        if let Some(language) = &self.language {
            params.push(("language".to_owned(), language.clone()));
        }
        if let Some(extra) = &self.extra_params {
            params.push(("jsonParams".to_owned(), encode_extra_params(extra)?));
        }
        Ok(params)
    }
}

/// Refund payload for `refund.do`.
#[derive(Debug, Clone, Default)]
pub struct RefundOrderRequest {
    /// Gateway-assigned order identifier.
    pub order_id: String,
    /// Amount to refund in minor currency units.
    pub amount: u64,
    /// Additional gateway parameters, sent as one serialized `jsonParams` value.
    pub extra_params: Option<Map<String, Value>>,
}

impl RefundOrderRequest {
    /// Creates a refund request from the required fields.
    #[must_use]
    pub fn new(order_id: impl Into<String>, amount: u64) -> Self {
        Self { order_id: order_id.into(), amount, extra_params: None }
    }

    /// Checks the field rules for `refund.do`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first gateway parameter that
    /// breaks its rule.
    pub fn validate(&self) -> Result<()> {
        validate_required_text("orderId", &self.order_id)?;
        validate_amount(self.amount)?;
        Ok(())
    }

    pub(crate) fn params(&self) -> Result<Vec<(String, String)>> {
        let mut params = vec![
            ("orderId".to_owned(), self.order_id.clone()),
            ("amount".to_owned(), self.amount.to_string()),
        ];
        if let Some(extra) = &self.extra_params {
            params.push(("jsonParams".to_owned(), encode_extra_params(extra)?));
        }
        Ok(params)
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

pub(crate) fn validate_required_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn validate_amount(amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(Error::validation("amount", "must be a positive number of minor units"));
    }
    Ok(())
}

pub(crate) fn validate_absolute_url(field: &'static str, value: &str) -> Result<()> {
    validate_required_text(field, value)?;
    let url = Url::parse(value)
        .map_err(|e| Error::validation(field, format!("must be an absolute URL: {e}")))?;
    if url.host_str().is_none() {
        return Err(Error::validation(field, "must be an absolute URL with a host"));
    }
    Ok(())
}

pub(crate) fn validate_language(value: &str) -> Result<()> {
    if value.len() != 2 || !value.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(Error::validation("language", "must be a two-letter ISO 639-1 code"));
    }
    Ok(())
}

pub(crate) fn validate_currency(code: u16) -> Result<()> {
    if code == 0 || code > 999 {
        return Err(Error::validation("currency", "must be a three-digit ISO 4217 numeric code"));
    }
    Ok(())
}

pub(crate) fn encode_extra_params(extra: &Map<String, Value>) -> Result<String> {
    serde_json::to_string(extra)
        .map_err(|e| Error::validation("extraParams", format!("could not serialize to JSON: {e}")))
}
