use crate::domain::amount::Amount;
use crate::domain::cart::{BillingDetails, Cart};
use crate::domain::order::Order;
use crate::domain::outcome::PaymentOutcome;
use crate::domain::ports::{PaymentGatewayBox, TransactionRecorderBox};
use crate::domain::record::TransactionRecord;
use crate::error::Result;
use tracing::{error, info, warn};

/// A captured order together with its classification and the amount that
/// was resolved for it.
#[derive(Debug, Clone)]
pub struct CapturedPayment {
    pub order: Order,
    pub outcome: PaymentOutcome,
    pub amount: Amount,
}

/// The main entry point of the checkout backend.
///
/// `CheckoutService` owns the provider gateway and the transaction log and
/// drives the order lifecycle: validate the cart, create the provider
/// order, capture it, classify the result and record it.
pub struct CheckoutService {
    gateway: PaymentGatewayBox,
    recorder: TransactionRecorderBox,
}

impl CheckoutService {
    pub fn new(gateway: PaymentGatewayBox, recorder: TransactionRecorderBox) -> Self {
        Self { gateway, recorder }
    }

    /// Validates the cart and creates a provider order for it.
    pub async fn create_order(
        &self,
        cart: &Cart,
        billing: Option<&BillingDetails>,
    ) -> Result<Order> {
        cart.validate()?;
        let order = self.gateway.create_order(cart, billing).await?;
        info!(order_id = %order.id_or_na(), "order created");
        Ok(order)
    }

    /// Captures an approved order, classifies the provider's answer and
    /// records the attempt.
    ///
    /// The cart, when the storefront sends it along, only serves as the
    /// last-resort amount fallback. Recording is best-effort: a failed
    /// append is logged and swallowed because the money has already moved
    /// at the provider by the time we get here.
    pub async fn capture_order(
        &self,
        order_id: &str,
        cart: Option<&Cart>,
    ) -> Result<CapturedPayment> {
        let order = self.gateway.capture_order(order_id).await?;

        let outcome = PaymentOutcome::classify(&order);
        if outcome.used_order_fallback {
            warn!(
                order_id = %order.id_or_na(),
                status = %outcome.status,
                "no capture information found, falling back to order status"
            );
        }

        if let Some(auth) = order.authentication_result() {
            info!(
                order_id = %order.id_or_na(),
                liability_shift = auth.liability_shift.as_deref().unwrap_or("NO"),
                enrollment = auth.enrollment_status.as_deref().unwrap_or("-"),
                authentication = auth.authentication_status.as_deref().unwrap_or("-"),
                liability_shifted = auth.is_liability_shifted(),
                "3ds authentication result"
            );
        }

        let amount = Amount::extract(&order, cart);
        let record = TransactionRecord::from_capture(&order, &outcome, amount);
        if let Err(e) = self.recorder.record(&record).await {
            error!(order_id = %record.order_id, error = %e, "failed to record transaction");
        }

        if outcome.is_successful {
            info!(order_id = %record.order_id, amount = %amount, "payment captured");
        } else {
            info!(
                order_id = %record.order_id,
                status = %outcome.status,
                reason = outcome.decline_reason.as_deref().unwrap_or("-"),
                "payment not completed"
            );
        }

        Ok(CapturedPayment {
            order,
            outcome,
            amount,
        })
    }

    /// Number of transactions recorded so far.
    pub async fn transaction_count(&self) -> Result<usize> {
        self.recorder.count().await
    }

    /// The whole transaction log as CSV, `None` before the first record.
    pub async fn export_transactions(&self) -> Result<Option<String>> {
        self.recorder.export().await
    }
}
