/// Output formatting — XRP denomination conversion and display helpers.
///
/// XRP uses 6 decimal places (drops). 1 XRP = 1_000_000 drops.
use serde_json::Value;

use crate::decode::{RawTransaction, WalletPayload};
use crate::network::price::PriceQuote;
use crate::state::{DisplayTransaction, FeeAmount, WalletSummary};

const DROPS_PER_XRP: u64 = 1_000_000;
const SUCCESS_CODE: &str = "tesSUCCESS";

/// Convert drops to a human-readable XRP string.
/// Examples: 1_500_000 -> "1.500000", 12 -> "0.000012"
#[must_use]
pub fn drops_to_xrp(drops: u64) -> String {
    let whole = drops / DROPS_PER_XRP;
    let frac = drops % DROPS_PER_XRP;
    format!("{whole}.{frac:06}")
}

/// Convert a drops amount given as text into XRP.
///
/// Plain integers are converted exactly; other numeric text (e.g. "1.5")
/// goes through floating point. Returns `None` for non-numeric input.
#[must_use]
pub fn parse_drops(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(drops) = raw.parse::<u64>() {
        return Some(drops_to_xrp(drops));
    }
    let value: f64 = raw.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(to_fixed(value / DROPS_PER_XRP as f64, 6))
}

/// Fixed-decimal rendering that rounds halves away from zero
/// (10.125 -> "10.13"), unlike `{:.N}` which rounds halves to even.
#[must_use]
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let scaled = (value * scale).round();
    if scaled == 0.0 {
        return format!("{:.decimals$}", 0.0);
    }
    if !scaled.is_finite() {
        return format!("{value:.decimals$}");
    }
    format!("{:.decimals$}", scaled / scale)
}

/// Human label for a ledger transaction type. Unknown codes pass through.
#[must_use]
pub fn transaction_type_label(code: Option<&str>) -> String {
    match code {
        Some("Payment") => "Payment".to_string(),
        Some("AccountSet") => "Account Update".to_string(),
        Some("TrustSet") => "Trustline Set".to_string(),
        Some(other) if !other.is_empty() => other.to_string(),
        _ => "Unknown".to_string(),
    }
}

/// Map one raw explorer record to its display form.
#[must_use]
pub fn format_transaction(raw: &RawTransaction) -> DisplayTransaction {
    // Object-shaped amounts are issued currencies, not drops.
    let amount_native = match raw.amount() {
        Some(Value::String(s)) if !s.is_empty() => parse_drops(s),
        _ => None,
    };

    let fee_native = match raw.fee() {
        Some(Value::String(s)) if !s.is_empty() => parse_drops(s),
        // A numeric zero fee counts as missing.
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::Number(n)) => match n.as_u64() {
            Some(drops) => Some(drops_to_xrp(drops)),
            None => n.as_f64().map(|v| to_fixed(v / DROPS_PER_XRP as f64, 6)),
        },
        _ => None,
    }
    .map_or(FeeAmount::NotApplicable, FeeAmount::Native);

    DisplayTransaction {
        type_label: transaction_type_label(raw.transaction_type().as_deref()),
        succeeded: raw.result() == Some(SUCCESS_CODE),
        amount_native,
        fee_native,
    }
}

/// Format every raw record, preserving input order.
#[must_use]
pub fn format_transactions(raw: &[RawTransaction]) -> Vec<DisplayTransaction> {
    raw.iter().map(format_transaction).collect()
}

/// Build the view model for a successful query.
#[must_use]
pub fn summarize(payload: &WalletPayload) -> WalletSummary {
    WalletSummary {
        address: payload.address.clone(),
        balance_native: decimal_field(payload.balance_xrp.as_ref(), 6),
        usd_value: decimal_field(payload.usd_value.as_ref(), 2),
        transactions: format_transactions(&payload.transactions),
    }
}

/// A server-provided decimal (string or number) rendered with fixed decimals.
/// Missing or non-numeric values render as zero.
fn decimal_field(value: Option<&Value>, decimals: usize) -> String {
    let parsed = match value {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    let amount = parsed.filter(|v| v.is_finite()).unwrap_or(0.0);
    to_fixed(amount, decimals)
}

/// Fixed-decimal number with en-US thousands grouping.
/// Examples: (1234.5, 2) -> "1,234.50", (0.5, 4) -> "0.5000"
#[must_use]
pub fn format_currency(amount: f64, decimals: usize) -> String {
    let fixed = to_fixed(amount.abs(), decimals);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if amount.is_sign_negative() && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format the current XRP price, or a zero placeholder before a quote arrives.
#[must_use]
pub fn format_price(quote: Option<&PriceQuote>) -> String {
    match quote {
        Some(q) if q.usd > 0.0 => format!("${}", format_currency(q.usd, 4)),
        _ => "$0.0000".to_string(),
    }
}

/// Format a balance string (already in XRP) for display.
#[must_use]
pub fn format_balance(balance_native: &str) -> String {
    let amount = balance_native.parse::<f64>().unwrap_or(0.0);
    format!("{} XRP", format_currency(amount, 6))
}

/// Format a USD value string for display.
#[must_use]
pub fn format_usd(usd_value: &str) -> String {
    let amount = usd_value.parse::<f64>().unwrap_or(0.0);
    format!("${}", format_currency(amount, 2))
}

#[must_use]
pub fn format_tx_count(count: usize) -> String {
    format!("{count} txns")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> RawTransaction {
        RawTransaction::new(value)
    }

    #[test]
    fn drops_to_xrp_zero() {
        assert_eq!(drops_to_xrp(0), "0.000000");
    }

    #[test]
    fn drops_to_xrp_one() {
        assert_eq!(drops_to_xrp(1_000_000), "1.000000");
    }

    #[test]
    fn drops_to_xrp_small() {
        assert_eq!(drops_to_xrp(12), "0.000012");
    }

    #[test]
    fn drops_to_xrp_large() {
        assert_eq!(drops_to_xrp(123_456_789_012), "123456.789012");
    }

    #[test]
    fn parse_drops_integer() {
        assert_eq!(parse_drops("2000000").as_deref(), Some("2.000000"));
    }

    #[test]
    fn parse_drops_decimal_text() {
        assert_eq!(parse_drops("1500000.0").as_deref(), Some("1.500000"));
    }

    #[test]
    fn parse_drops_rejects_garbage() {
        assert_eq!(parse_drops("abc"), None);
        assert_eq!(parse_drops(""), None);
        assert_eq!(parse_drops("NaN"), None);
        assert_eq!(parse_drops("inf"), None);
    }

    #[test]
    fn type_labels() {
        assert_eq!(transaction_type_label(Some("Payment")), "Payment");
        assert_eq!(transaction_type_label(Some("AccountSet")), "Account Update");
        assert_eq!(transaction_type_label(Some("TrustSet")), "Trustline Set");
        assert_eq!(transaction_type_label(Some("OfferCreate")), "OfferCreate");
        assert_eq!(transaction_type_label(Some("")), "Unknown");
        assert_eq!(transaction_type_label(None), "Unknown");
    }

    #[test]
    fn native_payment() {
        let tx = format_transaction(&raw(json!({
            "tx": { "TransactionType": "Payment", "Amount": "2000000", "Fee": "12" },
            "meta": { "TransactionResult": "tesSUCCESS" }
        })));
        assert_eq!(
            tx,
            DisplayTransaction {
                type_label: "Payment".to_string(),
                succeeded: true,
                amount_native: Some("2.000000".to_string()),
                fee_native: FeeAmount::Native("0.000012".to_string()),
            }
        );
    }

    #[test]
    fn only_tes_success_succeeds() {
        for code in ["tecUNFUNDED_PAYMENT", "tesSUCCESS ", "TESSUCCESS", "terQUEUED"] {
            let tx = format_transaction(&raw(json!({
                "tx": { "TransactionType": "Payment" },
                "meta": { "TransactionResult": code }
            })));
            assert!(!tx.succeeded, "{code} should be classified as failed");
        }

        let tx = format_transaction(&raw(json!({ "tx": {} })));
        assert!(!tx.succeeded, "missing result should be classified as failed");
    }

    #[test]
    fn issued_currency_amount_is_absent() {
        let tx = format_transaction(&raw(json!({
            "tx": {
                "TransactionType": "Payment",
                "Amount": { "currency": "USD", "issuer": "rIssuer", "value": "10" },
                "Fee": "10"
            }
        })));
        assert_eq!(tx.amount_native, None);
        assert_eq!(tx.fee_native, FeeAmount::Native("0.000010".to_string()));
    }

    #[test]
    fn numeric_json_amount_is_absent() {
        let tx = format_transaction(&raw(json!({ "tx": { "Amount": 1000000 } })));
        assert_eq!(tx.amount_native, None);
    }

    #[test]
    fn missing_fee_is_not_applicable() {
        let tx = format_transaction(&raw(json!({ "tx": { "TransactionType": "AccountSet" } })));
        assert_eq!(tx.fee_native, FeeAmount::NotApplicable);
        assert_eq!(tx.fee_native.to_string(), "N/A");
        assert_eq!(tx.type_label, "Account Update");
    }

    #[test]
    fn zero_fee_is_not_not_applicable() {
        let tx = format_transaction(&raw(json!({ "tx": { "Fee": "0" } })));
        assert_eq!(tx.fee_native.to_string(), "0.000000");
    }

    #[test]
    fn numeric_zero_fee_is_not_applicable() {
        let tx = format_transaction(&raw(json!({ "tx": { "Fee": 0 } })));
        assert_eq!(tx.fee_native, FeeAmount::NotApplicable);
    }

    #[test]
    fn non_string_type_code_passes_through() {
        let tx = format_transaction(&raw(json!({ "tx": { "TransactionType": 5 } })));
        assert_eq!(tx.type_label, "5");

        let tx = format_transaction(&raw(json!({ "tx": { "TransactionType": true } })));
        assert_eq!(tx.type_label, "true");

        let tx = format_transaction(&raw(json!({ "tx": { "TransactionType": 0 } })));
        assert_eq!(tx.type_label, "Unknown");
    }

    #[test]
    fn numeric_json_fee_is_converted() {
        let tx = format_transaction(&raw(json!({ "tx": { "Fee": 15 } })));
        assert_eq!(tx.fee_native, FeeAmount::Native("0.000015".to_string()));
    }

    #[test]
    fn non_object_record_degrades() {
        let tx = format_transaction(&raw(json!("garbage")));
        assert_eq!(tx.type_label, "Unknown");
        assert!(!tx.succeeded);
        assert_eq!(tx.amount_native, None);
        assert_eq!(tx.fee_native, FeeAmount::NotApplicable);
    }

    #[test]
    fn format_preserves_order_and_length() {
        let records = vec![
            raw(json!({ "tx": { "TransactionType": "TrustSet" } })),
            raw(json!(null)),
            raw(json!({ "tx": { "TransactionType": "Payment" } })),
        ];
        let out = format_transactions(&records);
        let labels: Vec<&str> = out.iter().map(|t| t.type_label.as_str()).collect();
        assert_eq!(labels, ["Trustline Set", "Unknown", "Payment"]);
    }

    #[test]
    fn summarize_normalizes_fields() {
        let payload = WalletPayload::from_value(json!({
            "address": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "balanceXRP": "25.5",
            "usdValue": 12.75,
            "transactions": []
        }));
        let summary = summarize(&payload);
        assert_eq!(summary.address.as_deref(), Some("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        assert_eq!(summary.balance_native, "25.500000");
        assert_eq!(summary.usd_value, "12.75");
        assert!(summary.transactions.is_empty());
    }

    #[test]
    fn summarize_defaults_missing_fields() {
        let summary = summarize(&WalletPayload::from_value(json!({})));
        assert_eq!(summary.address, None);
        assert_eq!(summary.balance_native, "0.000000");
        assert_eq!(summary.usd_value, "0.00");
    }

    #[test]
    fn summarize_rounds_halves_up() {
        let summary = summarize(&WalletPayload::from_value(json!({ "usdValue": "10.125" })));
        assert_eq!(summary.usd_value, "10.13");

        let summary = summarize(&WalletPayload::from_value(json!({ "usdValue": -10.125 })));
        assert_eq!(summary.usd_value, "-10.13");
    }

    #[test]
    fn to_fixed_rounds_halves_away_from_zero() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(0.53125, 4), "0.5313");
        assert_eq!(to_fixed(1.0, 6), "1.000000");
        assert_eq!(to_fixed(-0.001, 2), "0.00");
    }

    #[test]
    fn currency_rounds_halves_up() {
        assert_eq!(format_currency(0.125, 2), "0.13");
        assert_eq!(format_currency(1234.125, 2), "1,234.13");
        assert_eq!(format_price(Some(&PriceQuote::live(0.53125))), "$0.5313");
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(1234.5, 2), "1,234.50");
        assert_eq!(format_currency(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_currency(999.0, 2), "999.00");
        assert_eq!(format_currency(0.5, 4), "0.5000");
        assert_eq!(format_currency(-1500.0, 0), "-1,500");
        assert_eq!(format_currency(-0.0001, 2), "0.00");
    }

    #[test]
    fn price_display() {
        assert_eq!(format_price(None), "$0.0000");
        assert_eq!(format_price(Some(&PriceQuote::fallback())), "$0.5000");
        assert_eq!(format_price(Some(&PriceQuote::live(2.3456789))), "$2.3457");
    }

    #[test]
    fn balance_and_usd_display() {
        assert_eq!(format_balance("1234.5"), "1,234.500000 XRP");
        assert_eq!(format_usd("617.25"), "$617.25");
        assert_eq!(format_usd("junk"), "$0.00");
    }

    #[test]
    fn tx_count() {
        assert_eq!(format_tx_count(0), "0 txns");
        assert_eq!(format_tx_count(20), "20 txns");
    }
}
