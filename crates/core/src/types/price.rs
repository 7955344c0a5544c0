//! Text-backed price representation.
//!
//! The upstream catalog serves prices as plain strings (`"299.99"`), and the
//! local store denormalizes them unchanged into cart and favorite rows. The
//! numeric interpretation is deliberately lenient: anything that does not
//! parse as a number counts as zero, which matches the `CAST(price AS REAL)`
//! semantics used by the cart total aggregation.

use serde::{Deserialize, Serialize};

/// A product price as served by the catalog API.
///
/// Stored as the original text; use [`Price::amount`] for arithmetic and
/// comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    /// Create a price from its textual form.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The original price text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the price. Non-numeric text is treated as zero,
    /// mirroring SQLite's `CAST(... AS REAL)`.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.0.trim().parse().unwrap_or(0.0)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Price {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for Price {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}
