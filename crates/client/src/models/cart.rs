//! Cart line model.

use bazaar_core::{CartLineId, Price, ProductId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Product;

/// One line in the cart.
///
/// Product fields are denormalized at add time so the cart screen renders
/// without the remote catalog. Adding the same product twice creates a second
/// line under a fresh synthetic id; lines are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: String,
    pub product_price: Price,
    pub product_brand: String,
    pub quantity: i64,
    /// Epoch milliseconds; newest lines sort first.
    pub added_at: i64,
}

impl CartLine {
    /// Create a quantity-1 line for a product, stamped with the current time.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        Self {
            id: CartLineId::new(Uuid::new_v4().to_string()),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            product_image: product.image.clone(),
            product_price: product.price.clone(),
            product_brand: product.brand.clone(),
            quantity: 1,
            added_at: Utc::now().timestamp_millis(),
        }
    }

    /// Line subtotal using the lenient text-price interpretation.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn line_total(&self) -> f64 {
        self.product_price.amount() * self.quantity as f64
    }
}
