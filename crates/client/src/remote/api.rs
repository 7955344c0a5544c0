//! HTTP implementation of [`ProductSource`].

use async_trait::async_trait;
use tracing::debug;

use super::{ProductSource, RemoteError};
use crate::models::Product;

/// Client for the product catalog API.
///
/// Cheaply cloneable. Every call goes to the network; the composition root
/// wraps this in a [`super::CachedSource`] so adjacent reads share a fetch.
#[derive(Clone)]
pub struct ProductApi {
    client: reqwest::Client,
    endpoint: String,
}

impl ProductApi {
    /// Create a new catalog client for the given base URL.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/products", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ProductSource for ProductApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError> {
        debug!(endpoint = %self.endpoint, "fetching product catalog");

        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();

        // Read the body as text first for better error diagnostics.
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "catalog endpoint returned non-success status"
            );
            return Err(RemoteError::Status(status));
        }

        match serde_json::from_str::<Vec<Product>>(&body) {
            Ok(products) => Ok(products),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "failed to parse catalog response"
                );
                Err(RemoteError::Decode(e))
            }
        }
    }
}
