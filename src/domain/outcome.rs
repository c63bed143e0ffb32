use crate::domain::order::{CaptureStatus, Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// Unified payment status for reporting. Collapses order-level and
/// capture-level lifecycles into one display vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Completed,
    Declined,
    Pending,
    Failed,
    Refunded,
    PartiallyRefunded,
    Created,
    Saved,
    Approved,
    PayerActionRequired,
    Voided,
    #[serde(other)]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Declined => "DECLINED",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
            PaymentStatus::PartiallyRefunded => "PARTIALLY_REFUNDED",
            PaymentStatus::Created => "CREATED",
            PaymentStatus::Saved => "SAVED",
            PaymentStatus::Approved => "APPROVED",
            PaymentStatus::PayerActionRequired => "PAYER_ACTION_REQUIRED",
            PaymentStatus::Voided => "VOIDED",
            PaymentStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CaptureStatus> for PaymentStatus {
    fn from(status: CaptureStatus) -> Self {
        match status {
            CaptureStatus::Completed => PaymentStatus::Completed,
            CaptureStatus::Declined => PaymentStatus::Declined,
            CaptureStatus::Pending => PaymentStatus::Pending,
            CaptureStatus::Failed => PaymentStatus::Failed,
            CaptureStatus::Refunded => PaymentStatus::Refunded,
            CaptureStatus::PartiallyRefunded => PaymentStatus::PartiallyRefunded,
            CaptureStatus::Other => PaymentStatus::Unknown,
        }
    }
}

impl From<OrderStatus> for PaymentStatus {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Created => PaymentStatus::Created,
            OrderStatus::Saved => PaymentStatus::Saved,
            OrderStatus::Approved => PaymentStatus::Approved,
            OrderStatus::PayerActionRequired => PaymentStatus::PayerActionRequired,
            OrderStatus::Voided => PaymentStatus::Voided,
            OrderStatus::Completed => PaymentStatus::Completed,
            OrderStatus::Other => PaymentStatus::Unknown,
        }
    }
}

/// Card-network decline codes the shop has seen in production, mapped to
/// messages a shopper can act on. Codes outside the table get a generic
/// `Decline code: {code}` string.
fn decline_message(code: &str) -> Option<&'static str> {
    match code {
        "5400" => Some("Card expired"),
        "0500" => Some("Card declined by bank"),
        "9500" => Some("Suspected fraud - try another card"),
        "5180" => Some("Invalid card - try another card"),
        "5120" => Some("Insufficient funds"),
        "9520" => Some("Lost or stolen card - try another card"),
        "1330" => Some("Invalid account"),
        "5100" => Some("Generic decline"),
        "00N7" => Some("CVV verification failed"),
        _ => None,
    }
}

/// The classified result of a capture attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOutcome {
    pub status: PaymentStatus,
    pub is_successful: bool,
    pub decline_reason: Option<String>,
    /// True when no capture object was found and the order's own status had
    /// to stand in for it. Callers should surface this as a warning.
    pub used_order_fallback: bool,
}

impl PaymentOutcome {
    /// Classifies a capture response.
    ///
    /// The capture's status is authoritative whenever a capture object is
    /// present; the parent order's status is consulted only as a fallback.
    /// Never fails: payloads without purchase units or captures classify
    /// via the fallback path.
    pub fn classify(order: &Order) -> Self {
        match order.primary_capture() {
            Some(capture) => {
                let status = PaymentStatus::from(capture.status);
                let is_successful = status == PaymentStatus::Completed;
                let decline_reason = if is_successful {
                    None
                } else {
                    let code = capture
                        .processor_response
                        .as_ref()
                        .and_then(|p| p.response_code.as_deref());
                    Some(match code {
                        Some(code) => decline_message(code)
                            .map(str::to_string)
                            .unwrap_or_else(|| format!("Decline code: {}", code)),
                        None => "Unknown error".to_string(),
                    })
                };
                PaymentOutcome {
                    status,
                    is_successful,
                    decline_reason,
                    used_order_fallback: false,
                }
            }
            None => {
                let status = order
                    .status
                    .map(PaymentStatus::from)
                    .unwrap_or(PaymentStatus::Unknown);
                PaymentOutcome {
                    status,
                    is_successful: status == PaymentStatus::Completed,
                    decline_reason: None,
                    used_order_fallback: true,
                }
            }
        }
    }
}
