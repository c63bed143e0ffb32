use serde_json::{json, Value};

/// Provider capture response for a settled card payment.
pub fn completed_capture(order_id: &str, amount: &str) -> Value {
    json!({
        "id": order_id,
        "status": "COMPLETED",
        "purchase_units": [{
            "amount": { "currency_code": "USD", "value": amount },
            "payments": {
                "captures": [{
                    "id": "3C679366HH908993F",
                    "status": "COMPLETED",
                    "amount": { "currency_code": "USD", "value": amount }
                }]
            }
        }],
        "payer": {
            "name": { "given_name": "Ada", "surname": "Lovelace" },
            "email_address": "ada@example.com"
        },
        "payment_source": {
            "card": { "brand": "VISA", "last_digits": "1111" }
        }
    })
}

/// Capture response where the card network declined the charge. The parent
/// order still claims COMPLETED, as observed in sandbox traffic.
pub fn declined_capture(order_id: &str, response_code: &str) -> Value {
    json!({
        "id": order_id,
        "status": "COMPLETED",
        "purchase_units": [{
            "amount": { "currency_code": "USD", "value": "44.99" },
            "payments": {
                "captures": [{
                    "status": "DECLINED",
                    "amount": { "currency_code": "USD", "value": "44.99" },
                    "processor_response": { "response_code": response_code }
                }]
            }
        }],
        "payment_source": {
            "card": { "brand": "VISA", "last_digits": "0002" }
        }
    })
}

/// Storefront cart worth 25.00: two items at 10.00 and one at 5.00.
pub fn cart_items() -> Value {
    json!([
        { "id": "catan", "name": "Catan", "price": 10.00, "quantity": 2 },
        { "id": "dice", "name": "Dice set", "price": 5.00, "quantity": 1 }
    ])
}
