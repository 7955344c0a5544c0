//! TTL cache over a [`ProductSource`].
//!
//! The catalog endpoint serves the whole collection on every request, and
//! page loads, facet builds, and by-id lookups all start from that
//! collection. The cache sits between them and the underlying source so
//! adjacent reads within the TTL share one fetch instead of re-downloading
//! the collection each time. Errors are never cached; a failed fetch leaves
//! the cache empty and the next read retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use bazaar_core::ProductId;

use super::{ProductSource, RemoteError};
use crate::models::Product;

const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_KEY: &str = "products";

/// A [`ProductSource`] that caches the collection from an inner source for
/// 5 minutes.
pub struct CachedSource<S> {
    inner: S,
    cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl<S: ProductSource> CachedSource<S> {
    /// Wrap a source with the standard 5-minute TTL.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self::with_ttl(inner, CACHE_TTL)
    }

    fn with_ttl(inner: S, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self { inner, cache }
    }

    /// Look up a single product by id within the fetched collection.
    ///
    /// The API has no by-id endpoint, so this scans the (cached) full
    /// collection. An absent product is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the underlying fetch fails.
    pub async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RemoteError> {
        let products = self.fetch_products().await?;
        Ok(products.into_iter().find(|product| &product.id == id))
    }
}

#[async_trait]
impl<S: ProductSource> ProductSource for CachedSource<S> {
    async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError> {
        if let Some(hit) = self.cache.get(CACHE_KEY).await {
            debug!(count = hit.len(), "catalog cache hit");
            return Ok((*hit).clone());
        }

        let products = self.inner.fetch_products().await?;
        self.cache
            .insert(CACHE_KEY, Arc::new(products.clone()))
            .await;
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::Price;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            image: String::new(),
            price: Price::new("10"),
            description: String::new(),
            model: String::new(),
            brand: String::new(),
            created_at: String::new(),
        }
    }

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl CountingSource {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl ProductSource for CountingSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![product("1"), product("2")])
        }
    }

    /// Fails the first fetch, succeeds afterwards.
    struct FlakySource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ProductSource for FlakySource {
        async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                Err(RemoteError::Status(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ))
            } else {
                Ok(vec![product("1")])
            }
        }
    }

    #[tokio::test]
    async fn test_reads_within_ttl_share_one_fetch() {
        let (remote, calls) = CountingSource::new();
        let source = CachedSource::new(remote);

        let first = source.fetch_products().await.unwrap();
        let second = source.fetch_products().await.unwrap();
        let by_id = source.get_product(&ProductId::new("2")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(by_id.unwrap().id.as_str(), "2");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let (remote, calls) = CountingSource::new();
        let source = CachedSource::with_ttl(remote, Duration::from_millis(50));

        source.fetch_products().await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
        source.fetch_products().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CachedSource::new(FlakySource {
            calls: Arc::clone(&calls),
        });

        assert!(source.fetch_products().await.is_err());
        let recovered = source.fetch_products().await.unwrap();

        assert_eq!(recovered.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // The recovered collection is now served from the cache.
        source.fetch_products().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
