//! Catalog product as served by the remote API.

use bazaar_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// A product from the remote catalog.
///
/// Every field arrives as a string, including `price` and `created_at`. The
/// value is immutable: it is never locally mutated, only copied into
/// denormalized cart and favorite rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: Price,
    pub description: String,
    pub model: String,
    pub brand: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Product {
    /// Case-insensitive substring match against name and description, used
    /// by the catalog search path.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, description: &str) -> Product {
        Product {
            id: ProductId::new("1"),
            name: name.to_owned(),
            image: String::new(),
            price: Price::new("10"),
            description: description.to_owned(),
            model: String::new(),
            brand: String::new(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_query_matches_name_case_insensitive() {
        assert!(product("Bentley Focus", "sedan").matches_query("bentley"));
        assert!(product("Bentley Focus", "sedan").matches_query("FOCUS"));
    }

    #[test]
    fn test_query_matches_description() {
        assert!(product("Bentley", "A fast sedan").matches_query("fast"));
        assert!(!product("Bentley", "A fast sedan").matches_query("truck"));
    }
}
