//! Integration test support for Bazaar.
//!
//! Tests run entirely in-process: the database is in-memory SQLite with the
//! full migration set applied, and the remote catalog is replaced by an
//! in-process [`ProductSource`] serving a fixture collection. No network, no
//! files, no external services.
//!
//! Run with: `cargo test -p bazaar-integration-tests`

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use async_trait::async_trait;

use bazaar_client::db::{CartRepository, Database, FavoriteRepository, OrderRepository};
use bazaar_client::models::Product;
use bazaar_client::remote::{ProductSource, RemoteError};
use bazaar_core::{Price, ProductId};

/// In-process catalog serving a fixed collection.
pub struct StaticCatalog(pub Vec<Product>);

#[async_trait]
impl ProductSource for StaticCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError> {
        Ok(self.0.clone())
    }
}

/// In-process catalog that always fails with an HTTP 500.
pub struct FailingCatalog;

#[async_trait]
impl ProductSource for FailingCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError> {
        Err(RemoteError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

/// Build a fixture product. Brand and model cycle through a small set so
/// facet and filter tests have something to select.
#[must_use]
pub fn product(id: usize) -> Product {
    const BRANDS: [&str; 3] = ["Aston", "Bentley", "Citroen"];
    const MODELS: [&str; 4] = ["A1", "A2", "B1", "C1"];

    Product {
        id: ProductId::new(id.to_string()),
        name: format!("Product {id}"),
        image: format!("https://cdn.example.com/{id}.png"),
        price: Price::new(format!("{}.99", id * 10)),
        description: format!("Description of product {id}"),
        model: MODELS[id % MODELS.len()].to_owned(),
        brand: BRANDS[id % BRANDS.len()].to_owned(),
        created_at: format!("2023-01-{:02}T00:00:00.000Z", (id % 28) + 1),
    }
}

/// A fixture catalog of `n` products with ids `1..=n`.
#[must_use]
pub fn fixture_catalog(n: usize) -> Arc<dyn ProductSource> {
    Arc::new(StaticCatalog((1..=n).map(product).collect()))
}

/// Shared setup for integration tests: an in-memory database plus a fixture
/// catalog.
pub struct TestContext {
    pub db: Database,
    pub source: Arc<dyn ProductSource>,
}

impl TestContext {
    /// Create a context with `n` fixture products.
    pub async fn new(n: usize) -> Self {
        let db = Database::in_memory()
            .await
            .expect("in-memory database should open");
        Self {
            db,
            source: fixture_catalog(n),
        }
    }

    #[must_use]
    pub fn cart(&self) -> CartRepository {
        self.db.cart()
    }

    #[must_use]
    pub fn orders(&self) -> OrderRepository {
        self.db.orders()
    }

    #[must_use]
    pub fn favorites(&self) -> FavoriteRepository {
        self.db.favorites()
    }
}
