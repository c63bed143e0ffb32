use super::cart::{BillingDetails, Cart};
use super::order::Order;
use super::record::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type TransactionRecorderBox = Box<dyn TransactionRecorder>;

/// Provider-side order lifecycle: create, then capture.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a provider order priced from the cart. The returned order
    /// carries the id the storefront needs for approval and capture.
    async fn create_order(&self, cart: &Cart, billing: Option<&BillingDetails>) -> Result<Order>;

    /// Captures a previously approved order and returns the provider's
    /// capture response, parsed but not yet classified.
    async fn capture_order(&self, order_id: &str) -> Result<Order>;
}

/// Append-only transaction log.
#[async_trait]
pub trait TransactionRecorder: Send + Sync {
    /// Appends one record. Implementations must keep concurrent appends
    /// from interleaving within a row.
    async fn record(&self, record: &TransactionRecord) -> Result<()>;

    /// Number of data rows recorded so far.
    async fn count(&self) -> Result<usize>;

    /// Full serialized contents of the log, or `None` when nothing has
    /// been recorded yet.
    async fn export(&self) -> Result<Option<String>>;
}
