//! Route handlers: extract the request, call the service, shape the
//! response. No payment logic lives here.

use super::AppState;
use crate::domain::cart::{BillingDetails, Cart};
use crate::domain::view::PaymentResultView;
use crate::error::CheckoutError;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Cart as the storefront sends it. The client-computed total is advisory
/// only; every amount sent to the provider is recomputed from the items.
#[derive(Debug, Deserialize)]
pub struct CartPayload {
    pub items: Cart,
    #[serde(default)]
    #[allow(dead_code)]
    pub total: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub cart: CartPayload,
    #[serde(default)]
    pub billing: Option<BillingDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOrderRequest {
    pub order_id: String,
    #[serde(default)]
    pub cart: Option<Cart>,
    #[serde(default)]
    pub billing: Option<BillingDetails>,
}

/// Maps a service failure onto a status code and the original payload
/// shape the storefront expects: `{ error, details }`.
fn error_response(context: &str, err: CheckoutError) -> Response {
    error!(error = %err, "{}", context);
    let (status, details) = match err {
        CheckoutError::ValidationError(message) => {
            (StatusCode::BAD_REQUEST, json!(message))
        }
        CheckoutError::ProviderRequest { status, payload } => {
            (StatusCode::BAD_GATEWAY, json!({ "status": status, "payload": payload }))
        }
        CheckoutError::ProviderAuth(message) | CheckoutError::InvalidResponse(message) => {
            (StatusCode::BAD_GATEWAY, json!(message))
        }
        CheckoutError::Transport(e) => (StatusCode::BAD_GATEWAY, json!(e.to_string())),
        other => (StatusCode::INTERNAL_SERVER_ERROR, json!(other.to_string())),
    };
    (status, Json(json!({ "error": context, "details": details }))).into_response()
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "paypalConfigured": true,
    }))
}

/// POST /api/create-paypal-order
pub(crate) async fn handle_create_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateOrderRequest>,
) -> Response {
    match state
        .service
        .create_order(&request.cart.items, request.billing.as_ref())
        .await
    {
        Ok(order) => (StatusCode::OK, Json(order.into_raw())).into_response(),
        Err(err) => error_response("Failed to create PayPal order", err),
    }
}

/// POST /api/capture-paypal-order
pub(crate) async fn handle_capture_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CaptureOrderRequest>,
) -> Response {
    match state
        .service
        .capture_order(&request.order_id, request.cart.as_ref())
        .await
    {
        Ok(captured) => {
            let view = PaymentResultView::project(
                &captured.order,
                &captured.outcome,
                captured.amount,
                request.billing.as_ref(),
            );
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => error_response("Failed to capture PayPal order", err),
    }
}

/// GET /api/transactions
///
/// Streams the whole log as a CSV attachment, filename stamped with the
/// current date.
pub(crate) async fn handle_download_transactions(
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.service.export_transactions().await {
        Ok(Some(content)) => {
            let filename = format!(
                "gamemaster-transactions-{}.csv",
                Utc::now().format("%Y-%m-%d")
            );
            let headers = [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ];
            (StatusCode::OK, headers, content).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "No transactions found",
                "message": "No transactions have been processed yet."
            })),
        )
            .into_response(),
        Err(err) => error_response("Failed to download transactions", err),
    }
}

/// GET /api/transactions/count
pub(crate) async fn handle_transaction_count(State(state): State<Arc<AppState>>) -> Response {
    match state.service.transaction_count().await {
        Ok(0) => Json(json!({ "count": 0, "message": "No transactions yet" })).into_response(),
        Ok(count) => Json(json!({ "count": count })).into_response(),
        Err(err) => error_response("Failed to count transactions", err),
    }
}

/// POST /api/paypal-webhook
///
/// Acknowledges provider event notifications. Signature verification and
/// event routing are not wired up; captures are already recorded
/// synchronously on the capture path.
pub(crate) async fn handle_webhook(Json(event): Json<serde_json::Value>) -> impl IntoResponse {
    let event_type = event
        .get("event_type")
        .and_then(|v| v.as_str())
        .unwrap_or("UNKNOWN");
    let resource_id = event
        .pointer("/resource/id")
        .and_then(|v| v.as_str())
        .unwrap_or("-");

    match event_type {
        "CHECKOUT.ORDER.APPROVED" => {
            info!(resource_id = %resource_id, "webhook: order approved");
        }
        "PAYMENT.CAPTURE.COMPLETED" => {
            info!(resource_id = %resource_id, "webhook: payment capture completed");
        }
        "PAYMENT.CAPTURE.DENIED" => {
            info!(resource_id = %resource_id, "webhook: payment capture denied");
        }
        other => {
            info!(event_type = %other, "webhook: unhandled event");
        }
    }

    Json(json!({ "received": true }))
}
