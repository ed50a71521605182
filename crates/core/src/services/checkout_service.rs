use std::time::Duration;

use chrono::Local;
use tracing::debug;

use crate::backend::traits::SalesSink;
use crate::errors::CoreError;
use crate::models::cart::Cart;
use crate::models::sale::Sale;

/// Turns a non-empty cart into one immutable [`Sale`] in the sales
/// store.
///
/// Commit discipline: the cart is cleared only after the sink confirms
/// the write. On any failure — validation, backend, timeout — the cart
/// is left exactly as it was, so the user can retry manually; nothing
/// retries automatically.
pub struct CheckoutService;

impl CheckoutService {
    pub fn new() -> Self {
        Self
    }

    /// Finalize the cart as a sale.
    ///
    /// The lines are snapshotted before the write is dispatched, so a
    /// sale payload can never alias live cart state. `timeout` bounds
    /// the wait on the sink; expiry reports [`CoreError::CheckoutTimeout`]
    /// and leaves the cart untouched (the write itself may or may not
    /// have landed — the user sees the report view either way).
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        sink: &dyn SalesSink,
        timeout: Duration,
    ) -> Result<Sale, CoreError> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let lines = cart.lines().to_vec();
        let sale = Sale::new(lines, cart.total(), Local::now());

        match tokio::time::timeout(timeout, sink.append_sale(&sale)).await {
            Ok(Ok(())) => {
                debug!(id = %sale.id, total = sale.total, "sale committed");
                cart.clear();
                Ok(sale)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(CoreError::CheckoutTimeout(timeout.as_secs())),
        }
    }
}

impl Default for CheckoutService {
    fn default() -> Self {
        Self::new()
    }
}
