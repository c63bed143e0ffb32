//! HTTP JSON API consumed by the storefront.
//!
//! Endpoints:
//! - GET  /health                     - Server status
//! - POST /api/create-paypal-order    - Create a provider order from a cart
//! - POST /api/capture-paypal-order   - Capture an approved order
//! - GET  /api/transactions           - Download the transaction log as CSV
//! - GET  /api/transactions/count     - Number of recorded transactions
//! - POST /api/paypal-webhook         - Provider event notifications (ack only)
//!
//! All responses use Content-Type: application/json, except the CSV
//! download.

pub mod handlers;

use crate::application::service::CheckoutService;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use self::handlers::{
    handle_capture_order, handle_create_order, handle_download_transactions, handle_health,
    handle_transaction_count, handle_webhook,
};

/// Shared application context handed to every handler.
pub struct AppState {
    pub service: CheckoutService,
}

/// Construct a JSON error response with the given status code and message.
fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(serde_json::json!({ "error": message })))
}

async fn handle_not_found() -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, "not found")
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/create-paypal-order", post(handle_create_order))
        .route("/api/capture-paypal-order", post(handle_capture_order))
        .route("/api/transactions", get(handle_download_transactions))
        .route("/api/transactions/count", get(handle_transaction_count))
        .route("/api/paypal-webhook", post(handle_webhook))
        .fallback(handle_not_found)
        .with_state(state)
}
