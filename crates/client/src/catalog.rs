//! Client-side filter and sort engine for the catalog.
//!
//! Filtering happens over the fully materialized collection: brand-set and
//! model-set membership (an empty set matches everything), then one of four
//! fixed sort orders. Price sorts use the lenient text interpretation where
//! non-numeric prices count as zero; creation-time sorts compare the stored
//! ISO-8601 timestamp text, which orders correctly lexicographically.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// The four fixed sort options offered by the filter screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    OldToNew,
    NewToOld,
    PriceHighToLow,
    PriceLowToHigh,
}

impl SortOrder {
    /// All options, in the order the filter screen lists them.
    pub const ALL: [Self; 4] = [
        Self::OldToNew,
        Self::NewToOld,
        Self::PriceHighToLow,
        Self::PriceLowToHigh,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OldToNew => "Old to new",
            Self::NewToOld => "New to old",
            Self::PriceHighToLow => "Price high to low",
            Self::PriceLowToHigh => "Price low to high",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OldToNew => write!(f, "OLD_TO_NEW"),
            Self::NewToOld => write!(f, "NEW_TO_OLD"),
            Self::PriceHighToLow => write!(f, "PRICE_HIGH_TO_LOW"),
            Self::PriceLowToHigh => write!(f, "PRICE_LOW_TO_HIGH"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OLD_TO_NEW" => Ok(Self::OldToNew),
            "NEW_TO_OLD" => Ok(Self::NewToOld),
            "PRICE_HIGH_TO_LOW" => Ok(Self::PriceHighToLow),
            "PRICE_LOW_TO_HIGH" => Ok(Self::PriceLowToHigh),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// A filter screen result: sort choice plus selected brand/model sets.
///
/// Session-scoped and never persisted; discarded once applied or abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub sort: Option<SortOrder>,
    pub brands: BTreeSet<String>,
    pub models: BTreeSet<String>,
}

impl FilterSelection {
    /// True when the selection neither filters nor sorts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sort.is_none() && self.brands.is_empty() && self.models.is_empty()
    }
}

/// Distinct facet values for the filter screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Facets {
    pub brands: Vec<String>,
    pub models: Vec<String>,
}

/// Apply a filter selection: set-membership filtering, then the chosen sort.
#[must_use]
pub fn apply(products: &[Product], selection: &FilterSelection) -> Vec<Product> {
    let mut result: Vec<Product> = products
        .iter()
        .filter(|product| {
            (selection.brands.is_empty() || selection.brands.contains(&product.brand))
                && (selection.models.is_empty() || selection.models.contains(&product.model))
        })
        .cloned()
        .collect();

    match selection.sort {
        Some(SortOrder::OldToNew) => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        Some(SortOrder::NewToOld) => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some(SortOrder::PriceLowToHigh) => {
            result.sort_by(|a, b| a.price.amount().total_cmp(&b.price.amount()));
        }
        Some(SortOrder::PriceHighToLow) => {
            result.sort_by(|a, b| b.price.amount().total_cmp(&a.price.amount()));
        }
        None => {}
    }

    result
}

/// Build the distinct, non-blank, sorted brand and model lists.
#[must_use]
pub fn facets(products: &[Product]) -> Facets {
    let brands: BTreeSet<&str> = products
        .iter()
        .map(|product| product.brand.as_str())
        .filter(|brand| !brand.trim().is_empty())
        .collect();
    let models: BTreeSet<&str> = products
        .iter()
        .map(|product| product.model.as_str())
        .filter(|model| !model.trim().is_empty())
        .collect();

    Facets {
        brands: brands.into_iter().map(str::to_owned).collect(),
        models: models.into_iter().map(str::to_owned).collect(),
    }
}

/// Narrow a facet list by a case-insensitive substring query. A blank query
/// returns the full list.
#[must_use]
pub fn search_facet(values: &[String], query: &str) -> Vec<String> {
    if query.trim().is_empty() {
        return values.to_vec();
    }
    let query = query.to_lowercase();
    values
        .iter()
        .filter(|value| value.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
