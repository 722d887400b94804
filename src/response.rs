//! Typed gateway responses.
//!
//! Every operation decodes into the same [`GatewayResponse`] shape: the common
//! `errorCode`/`errorMessage` pair plus whichever operation-specific fields the
//! gateway chose to send. Fields this module does not know about are preserved
//! verbatim in [`GatewayResponse::extra`], so nothing the gateway says is lost.
//!
//! A non-zero `errorCode` is a normal decoded value, not a client error:
//! branch on [`GatewayResponse::is_success`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decoded gateway reply common to all four operations.
///
/// # Examples
///
/// ```
/// use sberbank_acquiring::response::GatewayResponse;
///
/// let reply: GatewayResponse =
///     serde_json::from_str(r#"{"errorCode":"7","errorMessage":"retry later"}"#).unwrap();
/// assert!(!reply.is_success());
/// assert_eq!(reply.error_code, Some(7));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    /// Gateway error code; absent or zero means the operation was accepted.
    ///
    /// Sent as a JSON number by most gateway revisions and as a numeric
    /// string by some; both decode.
    #[serde(default, deserialize_with = "lenient_code")]
    pub error_code: Option<i64>,
    /// Human-readable companion to `error_code`, localized per `language`.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Gateway-assigned order identifier (registration).
    #[serde(default)]
    pub order_id: Option<String>,
    /// Payment form URL the payer is redirected to (registration).
    #[serde(default)]
    pub form_url: Option<String>,
    /// Raw order status code (status inquiry). See [`OrderState`] for the
    /// documented values.
    #[serde(default, deserialize_with = "lenient_code")]
    pub order_status: Option<i64>,
    /// Merchant-assigned order number (status inquiry).
    #[serde(default)]
    pub order_number: Option<String>,
    /// Remaining fields the gateway sent, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GatewayResponse {
    /// True when the gateway reported no business error.
    ///
    /// By gateway convention an absent `errorCode` and `errorCode == 0` both
    /// mean success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.error_code, None | Some(0))
    }

    /// Typed view of [`order_status`](Self::order_status) for the documented
    /// codes; `None` when the status is absent or undocumented.
    #[must_use]
    pub fn order_state(&self) -> Option<OrderState> {
        self.order_status.and_then(OrderState::from_code)
    }
}

/// Documented order lifecycle states reported in `orderStatus`.
///
/// The client never branches on these; they exist so callers do not scatter
/// magic numbers. An order moves through the gateway as
/// `Registered → Held → Deposited`, terminating in `Reversed`, `Refunded`,
/// or `Declined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    /// Order registered, payment not started.
    Registered,
    /// Authorization hold placed on the amount.
    Held,
    /// Amount deposited; settlement complete.
    Deposited,
    /// Authorization reversed.
    Reversed,
    /// Refund issued.
    Refunded,
    /// Authorization initiated through the issuer's ACS.
    AcsAuthorization,
    /// Authorization declined.
    Declined,
}

impl OrderState {
    /// Maps a gateway status code to its documented state.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Registered),
            1 => Some(Self::Held),
            2 => Some(Self::Deposited),
            3 => Some(Self::Reversed),
            4 => Some(Self::Refunded),
            5 => Some(Self::AcsAuthorization),
            6 => Some(Self::Declined),
            _ => None,
        }
    }

    /// The wire code of this state.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Registered => 0,
            Self::Held => 1,
            Self::Deposited => 2,
            Self::Reversed => 3,
            Self::Refunded => 4,
            Self::AcsAuthorization => 5,
            Self::Declined => 6,
        }
    }
}

/// Accepts a numeric code sent either as a JSON number or a numeric string.
fn lenient_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("numeric code out of i64 range")),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("non-numeric code `{text}`: {e}"))),
        other => {
            Err(serde::de::Error::custom(format!("expected number or string, got {other}")))
        }
    }
}
