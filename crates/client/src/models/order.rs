//! Placed order model.

use bazaar_core::{OrderId, OrderNumber, OrderStatus};
use serde::{Deserialize, Serialize};

use super::CartLine;

/// An order placed from the cart.
///
/// The line items are an immutable snapshot of the cart contents at checkout
/// time; only `status` changes afterwards (or the order is deleted outright).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub items: Vec<CartLine>,
    pub total_amount: f64,
    /// Epoch milliseconds of checkout.
    pub order_date: i64,
    pub status: OrderStatus,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}
