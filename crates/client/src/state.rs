//! Application state owned by the process-level composition root.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{Database, RepositoryError};
use crate::remote::{CachedSource, ProductApi, ProductSource};

/// Application state: the database handle and the cached catalog client.
///
/// Explicitly constructed at startup and handed to whoever needs it - there
/// is no lazily-initialized global. Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db: Database,
    products: Arc<CachedSource<ProductApi>>,
}

impl AppState {
    /// Create the application state: open the database (running migrations)
    /// and build the catalog client behind its cache.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database cannot be opened or
    /// migrated.
    pub async fn new(config: AppConfig) -> Result<Self, RepositoryError> {
        let db = Database::connect(&config.database_path).await?;
        let products = Arc::new(CachedSource::new(ProductApi::new(&config.api_base_url)));

        Ok(Self {
            inner: Arc::new(AppStateInner { db, products }),
        })
    }

    /// Get a reference to the database handle.
    #[must_use]
    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    /// Get a reference to the cached catalog client.
    #[must_use]
    pub fn products(&self) -> &CachedSource<ProductApi> {
        &self.inner.products
    }

    /// The catalog client as a shareable [`ProductSource`].
    #[must_use]
    pub fn product_source(&self) -> Arc<dyn ProductSource> {
        Arc::clone(&self.inner.products) as Arc<dyn ProductSource>
    }
}
