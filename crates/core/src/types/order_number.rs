//! Human-readable order numbers.

use serde::{Deserialize, Serialize};

/// A human-readable order number, derived from the checkout timestamp.
///
/// Format: `ORD-<epoch millis>`. The order's primary key is a separate UUID;
/// this value is what the user sees on receipts and the order history screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Create an order number from an epoch-milliseconds checkout timestamp.
    #[must_use]
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(format!("ORD-{millis}"))
    }

    /// The order number text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderNumber {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let number = OrderNumber::from_timestamp_millis(1_700_000_000_000);
        assert_eq!(number.as_str(), "ORD-1700000000000");
    }
}
