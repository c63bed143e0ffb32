use crate::domain::amount::Amount;
use crate::domain::order::Order;
use crate::domain::outcome::{PaymentOutcome, PaymentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column order of the transaction log. Written once when a log file is
/// created; data rows follow the same order forever after.
pub const CSV_HEADERS: [&str; 7] = [
    "Timestamp",
    "Order ID",
    "Status",
    "Amount",
    "Payer Email",
    "Payment Source",
    "Purchase Units",
];

/// One appended row of the transaction log. Built once per capture
/// attempt, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Status")]
    pub status: PaymentStatus,
    #[serde(rename = "Amount")]
    pub amount: Amount,
    #[serde(rename = "Payer Email")]
    pub payer_email: String,
    #[serde(rename = "Payment Source")]
    pub payment_source: String,
    #[serde(rename = "Purchase Units")]
    pub purchase_units: String,
}

impl TransactionRecord {
    /// Builds the row for a classified capture attempt.
    ///
    /// The status column records the classified status, not the order's
    /// own claim. Payment source and purchase units are serialized from
    /// the raw provider payload, so audit rows keep fields the typed
    /// model does not carry; a response without a payment source records
    /// the literal `PayPal`.
    pub fn from_capture(order: &Order, outcome: &PaymentOutcome, amount: Amount) -> Self {
        let payment_source = order
            .raw_payment_source()
            .and_then(|source| serde_json::to_string(source).ok())
            .unwrap_or_else(|| "PayPal".to_string());
        let purchase_units = order
            .raw_purchase_units()
            .and_then(|units| serde_json::to_string(units).ok())
            .unwrap_or_else(|| "[]".to_string());

        TransactionRecord {
            timestamp: Utc::now(),
            order_id: order.id_or_na().to_string(),
            status: outcome.status,
            amount,
            payer_email: order.payer_email().unwrap_or("N/A").to_string(),
            payment_source,
            purchase_units,
        }
    }
}
