//! Pagination adapter over the unpaginated catalog endpoint.
//!
//! The remote API returns the full collection, so paging is client-side: each
//! load fetches the collection (served from the remote client's cache when
//! warm), optionally filters it by the search query, and slices out the
//! requested page. Page keys are 1-based.

use std::sync::Arc;

use crate::models::Product;
use crate::remote::{ProductSource, RemoteError};

/// Items per page.
pub const PAGE_SIZE: usize = 20;

/// How close to the end of the loaded list the UI may get before the next
/// page should be requested.
pub const PREFETCH_DISTANCE: usize = 3;

/// One loaded page plus the keys of its neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Product>,
    pub prev_key: Option<u32>,
    pub next_key: Option<u32>,
}

/// Paging source over a [`ProductSource`], optionally narrowed by a search
/// query (case-insensitive substring match on name and description).
#[derive(Clone)]
pub struct ProductPagingSource {
    source: Arc<dyn ProductSource>,
    query: Option<String>,
}

impl ProductPagingSource {
    /// Create a paging source. `query` narrows the collection before slicing.
    #[must_use]
    pub fn new(source: Arc<dyn ProductSource>, query: Option<String>) -> Self {
        Self { source, query }
    }

    /// The active search query, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Load one page. `key` is the 1-based page index; `None` means the
    /// first page.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the underlying fetch fails; errors surface
    /// as load results, they never panic past this boundary.
    pub async fn load(&self, key: Option<u32>, page_size: usize) -> Result<Page, RemoteError> {
        let page = key.unwrap_or(1).max(1);

        let mut products = self.source.fetch_products().await?;
        if let Some(query) = self.query.as_deref() {
            products.retain(|product| product.matches_query(query));
        }

        Ok(slice_page(products, page, page_size))
    }
}

/// Slice the `page`-th window (1-based) of `size` items out of the full list
/// and compute the neighboring page keys.
fn slice_page(products: Vec<Product>, page: u32, size: usize) -> Page {
    let total = products.len();
    let start = (page as usize - 1).saturating_mul(size);
    let end = start.saturating_add(size).min(total);

    let items = if start < total {
        products
            .into_iter()
            .skip(start)
            .take(end - start)
            .collect()
    } else {
        Vec::new()
    };

    Page {
        items,
        prev_key: (page > 1).then(|| page - 1),
        next_key: (end < total).then(|| page + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bazaar_core::{Price, ProductId};

    struct StaticSource(Vec<Product>);

    #[async_trait]
    impl ProductSource for StaticSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ProductSource for FailingSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError> {
            Err(RemoteError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
        }
    }

    fn product(id: usize) -> Product {
        Product {
            id: ProductId::new(id.to_string()),
            name: format!("Product {id}"),
            image: String::new(),
            price: Price::new("1"),
            description: format!("Description {id}"),
            model: String::new(),
            brand: String::new(),
            created_at: String::new(),
        }
    }

    fn catalog(n: usize) -> Arc<dyn ProductSource> {
        Arc::new(StaticSource((1..=n).map(product).collect()))
    }

    #[tokio::test]
    async fn test_first_page_of_large_collection() {
        let source = ProductPagingSource::new(catalog(45), None);
        let page = source.load(None, 20).await.unwrap();

        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[0].id.as_str(), "1");
        assert_eq!(page.prev_key, None);
        assert_eq!(page.next_key, Some(2));
    }

    #[tokio::test]
    async fn test_last_partial_page() {
        let source = ProductPagingSource::new(catalog(45), None);
        let page = source.load(Some(3), 20).await.unwrap();

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id.as_str(), "41");
        assert_eq!(page.prev_key, Some(2));
        assert_eq!(page.next_key, None);
    }

    #[tokio::test]
    async fn test_exact_boundary_has_no_next_key() {
        let source = ProductPagingSource::new(catalog(40), None);
        let page = source.load(Some(2), 20).await.unwrap();

        assert_eq!(page.items.len(), 20);
        assert_eq!(page.next_key, None);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let source = ProductPagingSource::new(catalog(5), None);
        let page = source.load(Some(4), 20).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.prev_key, Some(3));
        assert_eq!(page.next_key, None);
    }

    // For all p: |page(p)| == min(s, max(0, n - (p-1)*s)), and next_key is
    // None exactly when the slice end reaches n.
    #[tokio::test]
    async fn test_slice_length_invariant() {
        let n = 53;
        let s = 20;
        let source = ProductPagingSource::new(catalog(n), None);

        for p in 1..=5u32 {
            let page = source.load(Some(p), s).await.unwrap();
            let expected = s.min(n.saturating_sub((p as usize - 1) * s));
            assert_eq!(page.items.len(), expected, "page {p}");

            let end = ((p as usize - 1) * s + page.items.len()).min(n);
            assert_eq!(page.next_key.is_none(), end >= n, "page {p}");
        }
    }

    #[tokio::test]
    async fn test_search_query_narrows_before_slicing() {
        let mut products: Vec<Product> = (1..=30).map(product).collect();
        products[4].name = "Unique Widget".to_owned();
        let source = ProductPagingSource::new(
            Arc::new(StaticSource(products)),
            Some("unique".to_owned()),
        );

        let page = source.load(None, 20).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Unique Widget");
        assert_eq!(page.next_key, None);
    }

    #[tokio::test]
    async fn test_fetch_error_surfaces_as_load_error() {
        let source = ProductPagingSource::new(Arc::new(FailingSource), None);
        assert!(source.load(None, 20).await.is_err());
    }
}
