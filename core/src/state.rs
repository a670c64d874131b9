use std::fmt;

use serde::Serialize;

use crate::network::price::PriceQuote;

/// An address submitted by the user. Only non-emptiness is checked here;
/// format validation is left to the explorer backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletQuery {
    address: String,
}

impl WalletQuery {
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        if address.is_empty() {
            None
        } else {
            Some(Self { address })
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Fee in XRP, or `NotApplicable` when the record carried no fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FeeAmount {
    Native(String),
    NotApplicable,
}

impl fmt::Display for FeeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(xrp) => f.write_str(xrp),
            Self::NotApplicable => f.write_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTransaction {
    pub type_label: String,
    pub succeeded: bool,
    /// XRP amount, only for native (drops) payments.
    pub amount_native: Option<String>,
    pub fee_native: FeeAmount,
}

impl DisplayTransaction {
    pub fn status_label(&self) -> &'static str {
        if self.succeeded { "SUCCESS" } else { "FAILED" }
    }

    /// First character of the type label, used as a list icon.
    pub fn type_initial(&self) -> Option<char> {
        self.type_label.chars().next()
    }

    pub fn amount_display(&self) -> Option<String> {
        self.amount_native.as_ref().map(|xrp| format!("{xrp} XRP"))
    }

    pub fn fee_display(&self) -> String {
        format!("{} XRP", self.fee_native)
    }
}

/// Result of one successful query. Replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletSummary {
    pub address: Option<String>,
    pub balance_native: String,
    pub usd_value: String,
    /// Same length and order as the explorer's list (most recent first).
    pub transactions: Vec<DisplayTransaction>,
}

impl WalletSummary {
    pub fn address_display(&self) -> &str {
        self.address.as_deref().unwrap_or("N/A")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success(WalletSummary),
    Error(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn summary(&self) -> Option<&WalletSummary> {
        match self {
            Self::Success(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything a presentation layer needs to render one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    pub state: ViewState,
    pub price: Option<PriceQuote>,
    pub can_submit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(succeeded: bool, amount: Option<&str>, fee: FeeAmount) -> DisplayTransaction {
        DisplayTransaction {
            type_label: "Trustline Set".to_string(),
            succeeded,
            amount_native: amount.map(str::to_string),
            fee_native: fee,
        }
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(WalletQuery::new("").is_none());
    }

    #[test]
    fn whitespace_query_is_accepted() {
        let query = WalletQuery::new(" ").expect("non-empty");
        assert_eq!(query.address(), " ");
    }

    #[test]
    fn display_labels() {
        let ok = tx(true, Some("1.000000"), FeeAmount::Native("0.000012".into()));
        assert_eq!(ok.status_label(), "SUCCESS");
        assert_eq!(ok.type_initial(), Some('T'));
        assert_eq!(ok.amount_display().as_deref(), Some("1.000000 XRP"));
        assert_eq!(ok.fee_display(), "0.000012 XRP");

        let failed = tx(false, None, FeeAmount::NotApplicable);
        assert_eq!(failed.status_label(), "FAILED");
        assert_eq!(failed.amount_display(), None);
        assert_eq!(failed.fee_display(), "N/A XRP");
    }

    #[test]
    fn address_display_defaults() {
        let summary = WalletSummary {
            address: None,
            balance_native: "0.000000".into(),
            usd_value: "0.00".into(),
            transactions: Vec::new(),
        };
        assert_eq!(summary.address_display(), "N/A");
    }

    #[test]
    fn view_state_accessors() {
        assert!(ViewState::Loading.is_loading());
        assert!(!ViewState::Idle.is_loading());
        assert_eq!(
            ViewState::Error("boom".into()).error_message(),
            Some("boom")
        );
        assert!(ViewState::Idle.summary().is_none());
    }

    #[test]
    fn fee_serializes_as_plain_string_or_null() {
        let native = serde_json::to_value(FeeAmount::Native("0.000010".into())).unwrap();
        assert_eq!(native, serde_json::json!("0.000010"));
        let na = serde_json::to_value(FeeAmount::NotApplicable).unwrap();
        assert_eq!(na, serde_json::Value::Null);
    }
}
