/// Turns a raw explorer response into a wallet payload or a typed failure.
use std::borrow::Cow;

use serde_json::Value;

use crate::error::ExploreError;
use crate::network::explorer::ExploreResponse;

/// One explorer transaction record, kept as untyped JSON.
///
/// The explorer relays ledger records verbatim, so every accessor tolerates
/// missing or wrongly-typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTransaction(Value);

impl RawTransaction {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Type code as text. Non-string codes are rendered as JSON; falsy ones
    /// (`0`, `false`, `""`) count as missing.
    pub fn transaction_type(&self) -> Option<Cow<'_, str>> {
        match self.0.pointer("/tx/TransactionType")? {
            Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
            Value::Null | Value::Bool(false) | Value::String(_) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    pub fn amount(&self) -> Option<&Value> {
        self.0.pointer("/tx/Amount").filter(|v| !v.is_null())
    }

    pub fn fee(&self) -> Option<&Value> {
        self.0.pointer("/tx/Fee").filter(|v| !v.is_null())
    }

    pub fn result(&self) -> Option<&str> {
        self.0.pointer("/meta/TransactionResult").and_then(Value::as_str)
    }
}

/// Successful explorer body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletPayload {
    pub address: Option<String>,
    pub balance_xrp: Option<Value>,
    pub usd_value: Option<Value>,
    pub transactions: Vec<RawTransaction>,
}

impl WalletPayload {
    /// Lenient extraction: fields of the wrong shape are treated as absent.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let address = match map.remove("address") {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };
        let transactions = match map.remove("transactions") {
            Some(Value::Array(items)) => items.into_iter().map(RawTransaction::new).collect(),
            _ => Vec::new(),
        };

        Self {
            address,
            balance_xrp: map.remove("balanceXRP").filter(|v| !v.is_null()),
            usd_value: map.remove("usdValue").filter(|v| !v.is_null()),
            transactions,
        }
    }
}

/// Decode an explorer response.
///
/// The body is parsed before the status is looked at: an unparsable body is
/// a `DecodeFailure` even on 200. A parsable body on a non-2xx status is an
/// application failure carrying the body's `message`.
pub fn decode_response(response: &ExploreResponse) -> Result<WalletPayload, ExploreError> {
    let value: Value = serde_json::from_str(&response.raw_body).map_err(|e| {
        tracing::warn!(
            status = response.status,
            error = %e,
            body = %response.raw_body,
            "explorer returned invalid JSON"
        );
        ExploreError::DecodeFailure
    })?;

    if !response.is_success() {
        let message = value.get("message").and_then(Value::as_str);
        tracing::warn!(
            status = response.status,
            server_message = ?message,
            "explorer rejected query"
        );
        return Err(ExploreError::application(message));
    }

    Ok(WalletPayload::from_value(value))
}
