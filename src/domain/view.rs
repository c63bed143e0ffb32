use crate::domain::amount::Amount;
use crate::domain::cart::BillingDetails;
use crate::domain::order::Order;
use crate::domain::outcome::{PaymentOutcome, PaymentStatus};
use serde::{Deserialize, Serialize};

/// The fields the storefront result modal renders. Pure projection of an
/// order plus its classified outcome; no I/O happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResultView {
    pub order_id: String,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub payment_method_label: String,
    pub payer_name: String,
    pub is_successful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
}

impl PaymentResultView {
    /// Projects a classified capture into the view model.
    ///
    /// The payer name prefers what the shopper typed into the billing form
    /// over the name the provider reports, and falls back to `"N/A"` when
    /// neither exists.
    pub fn project(
        order: &Order,
        outcome: &PaymentOutcome,
        amount: Amount,
        billing: Option<&BillingDetails>,
    ) -> Self {
        let payer_name = billing
            .and_then(BillingDetails::full_name)
            .or_else(|| order.payer_name())
            .unwrap_or_else(|| "N/A".to_string());

        PaymentResultView {
            order_id: order.id_or_na().to_string(),
            amount,
            status: outcome.status,
            payment_method_label: order.payment_method_label(),
            payer_name,
            is_successful: outcome.is_successful,
            decline_reason: outcome.decline_reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(value: serde_json::Value, billing: Option<&BillingDetails>) -> PaymentResultView {
        let order = Order::from_value(value).unwrap();
        let outcome = PaymentOutcome::classify(&order);
        let amount = Amount::extract(&order, None);
        PaymentResultView::project(&order, &outcome, amount, billing)
    }

    #[test]
    fn test_successful_card_view() {
        let view = project(
            json!({
                "id": "5O190127TN364715T",
                "status": "COMPLETED",
                "purchase_units": [{
                    "payments": {
                        "captures": [{
                            "status": "COMPLETED",
                            "amount": { "value": "44.99" }
                        }]
                    }
                }],
                "payer": { "name": { "given_name": "Ada", "surname": "Lovelace" } },
                "payment_source": { "card": { "brand": "VISA", "last_digits": "1111" } }
            }),
            None,
        );
        assert!(view.is_successful);
        assert_eq!(view.amount.to_string(), "44.99");
        assert_eq!(view.payment_method_label, "VISA Card ****1111");
        assert_eq!(view.payer_name, "Ada Lovelace");
        assert_eq!(view.decline_reason, None);
    }

    #[test]
    fn test_declined_view_carries_reason() {
        let view = project(
            json!({
                "id": "O-DEC",
                "purchase_units": [{
                    "payments": {
                        "captures": [{
                            "status": "DECLINED",
                            "processor_response": { "response_code": "9500" }
                        }]
                    }
                }]
            }),
            None,
        );
        assert!(!view.is_successful);
        assert_eq!(view.status, PaymentStatus::Declined);
        assert_eq!(
            view.decline_reason.as_deref(),
            Some("Suspected fraud - try another card")
        );
    }

    #[test]
    fn test_billing_name_wins_over_provider_name() {
        let billing = BillingDetails {
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            ..Default::default()
        };
        let view = project(
            json!({
                "id": "O1",
                "payer": { "name": { "given_name": "Ada", "surname": "Lovelace" } }
            }),
            Some(&billing),
        );
        assert_eq!(view.payer_name, "Grace Hopper");
    }

    #[test]
    fn test_payer_name_defaults_to_na() {
        let view = project(json!({ "id": "O1" }), None);
        assert_eq!(view.payer_name, "N/A");
    }

    #[test]
    fn test_serializes_camel_case() {
        let view = project(json!({ "id": "O1", "status": "COMPLETED" }), None);
        let encoded = serde_json::to_value(&view).unwrap();
        assert_eq!(encoded["orderId"], "O1");
        assert_eq!(encoded["isSuccessful"], true);
        assert_eq!(encoded["paymentMethodLabel"], "PayPal");
        assert!(encoded.get("declineReason").is_none());
    }
}
