use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a provider-side order.
///
/// Distinct from [`CaptureStatus`] on purpose: an order can report
/// `COMPLETED` while its capture was declined, and the two must never be
/// conflated by the type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Saved,
    Approved,
    PayerActionRequired,
    Voided,
    Completed,
    #[serde(other)]
    #[serde(rename = "UNKNOWN")]
    Other,
}

/// Status of a capture, the actual funds-transfer event. Authoritative for
/// payment success whenever a capture object is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaptureStatus {
    Completed,
    Declined,
    Pending,
    Failed,
    Refunded,
    PartiallyRefunded,
    #[serde(other)]
    #[serde(rename = "UNKNOWN")]
    Other,
}

/// A currency amount as the provider reports it: a decimal string value
/// plus an optional currency code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    pub value: Decimal,
}

/// Card-network response attached to a declined capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avs_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv_code: Option<String>,
}

/// One capture attempt inside a purchase unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: CaptureStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_response: Option<ProcessorResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captures: Option<Vec<Capture>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseUnit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Payments>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayerName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<PayerName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// 3-D Secure outcome reported on the card payment source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liability_shift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_status: Option<String>,
}

impl AuthenticationResult {
    /// A liability shift of POSSIBLE combined with authentication status Y
    /// means the issuer accepted the 3DS challenge.
    pub fn is_liability_shifted(&self) -> bool {
        self.liability_shift.as_deref() == Some("POSSIBLE")
            && self.authentication_status.as_deref() == Some("Y")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_digits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_result: Option<AuthenticationResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaypalWallet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paypal: Option<PaypalWallet>,
}

/// A provider order as returned by the create and capture endpoints.
///
/// Every level below the root is optional: capture responses for degraded
/// flows have been observed without purchase units, without captures, and
/// without payer data. Decoding never fails on absent branches; the
/// accessors below resolve them to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub purchase_units: Vec<PurchaseUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_source: Option<PaymentSource>,
    /// The payload exactly as received. Audit rows and pass-through
    /// responses read from here, so provider fields the typed model does
    /// not carry survive.
    #[serde(skip)]
    raw: serde_json::Value,
}

impl Order {
    /// Decodes a raw provider payload into the typed model, retaining the
    /// payload itself alongside. This is the single validated-parse step;
    /// everything downstream works on the typed fields or the raw value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let mut order = Order::deserialize(&value)
            .map_err(|e| CheckoutError::InvalidResponse(format!("order payload: {}", e)))?;
        order.raw = value;
        Ok(order)
    }

    /// Consumes the order, yielding the untouched provider payload.
    pub fn into_raw(self) -> serde_json::Value {
        self.raw
    }

    /// The payment source subtree exactly as the provider sent it.
    pub fn raw_payment_source(&self) -> Option<&serde_json::Value> {
        self.raw.get("payment_source")
    }

    /// The purchase units subtree exactly as the provider sent it.
    pub fn raw_purchase_units(&self) -> Option<&serde_json::Value> {
        self.raw.get("purchase_units")
    }

    /// The first capture of the first purchase unit, when any exists.
    pub fn primary_capture(&self) -> Option<&Capture> {
        self.purchase_units
            .first()?
            .payments
            .as_ref()?
            .captures
            .as_ref()?
            .first()
    }

    /// The amount actually charged, from the primary capture.
    pub fn capture_amount(&self) -> Option<&Money> {
        self.primary_capture()?.amount.as_ref()
    }

    /// The requested order-level amount of the first purchase unit.
    pub fn order_amount(&self) -> Option<&Money> {
        self.purchase_units.first()?.amount.as_ref()
    }

    pub fn id_or_na(&self) -> &str {
        self.id.as_deref().unwrap_or("N/A")
    }

    pub fn payer_email(&self) -> Option<&str> {
        self.payer.as_ref()?.email_address.as_deref()
    }

    /// The 3DS authentication result, present only on card payments that
    /// went through the SCA challenge.
    pub fn authentication_result(&self) -> Option<&AuthenticationResult> {
        self.payment_source
            .as_ref()?
            .card
            .as_ref()?
            .authentication_result
            .as_ref()
    }

    /// Human-readable payment method descriptor.
    ///
    /// Cards render as `"VISA Card ****1111"` with `Credit`/`XXXX`
    /// placeholders for missing parts. Wallet payments render as
    /// `"PayPal Account"`. A response without any payment source at all is
    /// labelled plain `"PayPal"`.
    pub fn payment_method_label(&self) -> String {
        match &self.payment_source {
            Some(source) => {
                if let Some(card) = &source.card {
                    let brand = card.brand.as_deref().unwrap_or("Credit");
                    let last_digits = card.last_digits.as_deref().unwrap_or("XXXX");
                    format!("{} Card ****{}", brand, last_digits)
                } else if source.paypal.is_some() {
                    "PayPal Account".to_string()
                } else {
                    "Unknown".to_string()
                }
            }
            None => "PayPal".to_string(),
        }
    }

    /// Payer name as reported by the provider, `None` when both name parts
    /// are absent or blank.
    pub fn payer_name(&self) -> Option<String> {
        let name = self.payer.as_ref()?.name.as_ref()?;
        let given = name.given_name.as_deref().unwrap_or("").trim();
        let surname = name.surname.as_deref().unwrap_or("").trim();
        let full = format!("{} {}", given, surname);
        let full = full.trim();
        if full.is_empty() {
            None
        } else {
            Some(full.to_string())
        }
    }
}
