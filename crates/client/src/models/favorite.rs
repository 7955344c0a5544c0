//! Favorite mark model.

use bazaar_core::{Price, ProductId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Product;

/// A favorited product.
///
/// Keyed by product id; existence of the row is what drives the favorite
/// icon. Display fields are denormalized so the favorites screen renders
/// without the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteMark {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub image_url: String,
    /// Epoch milliseconds; newest marks sort first.
    pub favorited_at: i64,
}

impl FavoriteMark {
    /// Create a mark for a product, stamped with the current time.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price.clone(),
            image_url: product.image.clone(),
            favorited_at: Utc::now().timestamp_millis(),
        }
    }
}
