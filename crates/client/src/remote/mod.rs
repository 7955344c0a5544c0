//! Remote catalog API client.
//!
//! The catalog endpoint is a single unauthenticated GET returning the full
//! product collection as a JSON array; there is no server-side pagination.
//! [`CachedSource`] layers a `moka` TTL cache over any [`ProductSource`] so
//! that adjacent page loads and facet builds share one fetch instead of
//! re-downloading the whole collection each time.

mod api;
mod cache;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Product;

pub use api::ProductApi;
pub use cache::CachedSource;

/// Errors from the remote catalog.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (connect, timeout, TLS, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("catalog endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not the expected JSON array.
    #[error("failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of the full product collection.
///
/// The trait seam lets tests substitute an in-process catalog for the HTTP
/// client.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch the entire product collection.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the fetch or decode fails. Implementations
    /// must surface errors as values, never panic past this boundary.
    async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError>;
}
