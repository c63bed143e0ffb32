mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use gamemaster_checkout::application::service::CheckoutService;
use gamemaster_checkout::domain::cart::{BillingDetails, Cart};
use gamemaster_checkout::domain::order::Order;
use gamemaster_checkout::domain::ports::PaymentGateway;
use gamemaster_checkout::error::{CheckoutError, Result};
use gamemaster_checkout::infrastructure::in_memory::InMemoryRecorder;
use gamemaster_checkout::interfaces::http::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

/// Gateway playing back canned provider responses.
#[derive(Clone)]
struct ScriptedGateway {
    capture_response: Value,
    fail_create: bool,
}

impl ScriptedGateway {
    fn capturing(capture_response: Value) -> Self {
        Self {
            capture_response,
            fail_create: false,
        }
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn create_order(&self, _cart: &Cart, _billing: Option<&BillingDetails>) -> Result<Order> {
        if self.fail_create {
            return Err(CheckoutError::ProviderRequest {
                status: 422,
                payload: json!({ "name": "UNPROCESSABLE_ENTITY" }),
            });
        }
        Order::from_value(json!({
            "id": "ORD-NEW",
            "status": "CREATED",
            "links": [
                {
                    "href": "https://api.sandbox.paypal.com/v2/checkout/orders/ORD-NEW",
                    "rel": "self",
                    "method": "GET"
                },
                {
                    "href": "https://www.sandbox.paypal.com/checkoutnow?token=ORD-NEW",
                    "rel": "approve",
                    "method": "GET"
                }
            ]
        }))
    }

    async fn capture_order(&self, _order_id: &str) -> Result<Order> {
        Order::from_value(self.capture_response.clone())
    }
}

fn app(gateway: ScriptedGateway) -> (axum::Router, InMemoryRecorder) {
    let recorder = InMemoryRecorder::new();
    let service = CheckoutService::new(Box::new(gateway), Box::new(recorder.clone()));
    (router(Arc::new(AppState { service })), recorder)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

#[tokio::test]
async fn test_create_order_returns_provider_order() {
    let (router, _) = app(ScriptedGateway::capturing(common::completed_capture(
        "ORD-NEW",
        "25.00",
    )));
    let (status, body) = send(
        &router,
        post_json(
            "/api/create-paypal-order",
            json!({
                "cart": { "items": common::cart_items(), "total": "25.00" },
                "billing": { "firstName": "Grace", "lastName": "Hopper" }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "ORD-NEW");
    assert_eq!(body["status"], "CREATED");
    // The storefront follows the approve link, so the provider payload must
    // pass through with every field intact.
    assert_eq!(body["links"][1]["rel"], "approve");
    assert!(body["links"][1]["href"].as_str().unwrap().contains("checkoutnow"));
}

#[tokio::test]
async fn test_create_order_rejects_empty_cart() {
    let (router, _) = app(ScriptedGateway::capturing(json!({})));
    let (status, body) = send(
        &router,
        post_json(
            "/api/create-paypal-order",
            json!({ "cart": { "items": [] } }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to create PayPal order");
    assert!(body["details"].as_str().unwrap().contains("cart"));
}

#[tokio::test]
async fn test_capture_projects_the_result_view() {
    let (router, recorder) = app(ScriptedGateway::capturing(common::completed_capture(
        "ORD-77",
        "44.99",
    )));
    let (status, body) = send(
        &router,
        post_json(
            "/api/capture-paypal-order",
            json!({
                "orderId": "ORD-77",
                "cart": common::cart_items(),
                "billing": { "firstName": "Grace", "lastName": "Hopper" }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderId"], "ORD-77");
    assert_eq!(body["isSuccessful"], true);
    assert_eq!(body["amount"], "44.99");
    assert_eq!(body["status"], "COMPLETED");
    assert_eq!(body["paymentMethodLabel"], "VISA Card ****1111");
    assert_eq!(body["payerName"], "Grace Hopper");
    assert!(body.get("declineReason").is_none());

    let records = recorder.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].order_id, "ORD-77");
}

#[tokio::test]
async fn test_capture_decline_is_reported_not_erred() {
    let (router, recorder) = app(ScriptedGateway::capturing(common::declined_capture(
        "ORD-88",
        "5120",
    )));
    let (status, body) = send(
        &router,
        post_json("/api/capture-paypal-order", json!({ "orderId": "ORD-88" })),
    )
    .await;

    // The HTTP call succeeded; the payment itself did not.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isSuccessful"], false);
    assert_eq!(body["status"], "DECLINED");
    assert_eq!(body["declineReason"], "Insufficient funds");

    let records = recorder.records().await;
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_provider_rejection_maps_to_bad_gateway() {
    let gateway = ScriptedGateway {
        capture_response: json!({}),
        fail_create: true,
    };
    let (router, _) = app(gateway);
    let (status, body) = send(
        &router,
        post_json(
            "/api/create-paypal-order",
            json!({ "cart": { "items": common::cart_items() } }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to create PayPal order");
    assert_eq!(body["details"]["status"], 422);
    assert_eq!(body["details"]["payload"]["name"], "UNPROCESSABLE_ENTITY");
}

#[tokio::test]
async fn test_transaction_count_and_download_lifecycle() {
    let (router, _) = app(ScriptedGateway::capturing(common::completed_capture(
        "ORD-1",
        "10.00",
    )));

    let (status, body) = send(&router, get("/api/transactions/count")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["message"], "No transactions yet");

    let (status, body) = send(&router, get("/api/transactions")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No transactions found");

    let (status, _) = send(
        &router,
        post_json("/api/capture-paypal-order", json!({ "orderId": "ORD-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, get("/api/transactions/count")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let response = router
        .clone()
        .oneshot(get("/api/transactions"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "text/csv"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"gamemaster-transactions-"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let content = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(content.starts_with("\"Timestamp\""));
    assert!(content.contains("\"ORD-1\""));
}

#[tokio::test]
async fn test_webhook_acknowledges_events() {
    let (router, _) = app(ScriptedGateway::capturing(json!({})));
    let (status, body) = send(
        &router,
        post_json(
            "/api/paypal-webhook",
            json!({
                "event_type": "PAYMENT.CAPTURE.COMPLETED",
                "resource": { "id": "3C679366HH908993F" }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);
}

#[tokio::test]
async fn test_unknown_route_is_a_json_404() {
    let (router, _) = app(ScriptedGateway::capturing(json!({})));
    let (status, body) = send(&router, get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (router, _) = app(ScriptedGateway::capturing(json!({})));
    let (status, body) = send(&router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}
