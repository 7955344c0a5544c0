//! Local SQLite persistence.
//!
//! # Tables
//!
//! - `cart_items` - current cart lines (denormalized product fields)
//! - `orders` - placed orders with a JSON snapshot of their lines
//! - `favorites` - favorited products, keyed by product id
//!
//! # Migrations
//!
//! Embedded from `crates/client/migrations/` and run by [`Database::connect`].
//! Migration 2 additively introduces the `favorites` table.
//!
//! # Change notification
//!
//! There is no push channel in SQLite itself, so reactive reads are built on
//! table-level version counters: every write bumps the owning table's
//! `watch` counter, and observers re-run their query on each bump.

pub mod cart;
pub mod favorites;
pub mod orders;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tokio::sync::watch;

pub use cart::CartRepository;
pub use favorites::FavoriteRepository;
pub use orders::OrderRepository;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed at startup.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A stored value could not be interpreted (bad JSON snapshot, unknown
    /// status string).
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// JSON (de)serialization of an order snapshot failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Checkout was attempted with an empty cart.
    #[error("cannot place an order from an empty cart")]
    EmptyCart,
}

/// Version counter for one table.
///
/// Writers call [`TableWatcher::mark_changed`]; readers hold the receiver
/// from [`TableWatcher::subscribe`] and re-query on every change.
#[derive(Debug)]
pub struct TableWatcher {
    tx: watch::Sender<u64>,
}

impl TableWatcher {
    fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx }
    }

    /// Record a write to the table, waking all subscribers.
    pub fn mark_changed(&self) {
        self.tx.send_modify(|version| *version += 1);
    }

    /// Subscribe to table changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

/// Handle to the local store.
///
/// Explicitly constructed by the composition root and handed to whoever
/// needs it; its lifetime is the process lifetime. Cheaply cloneable.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

struct DatabaseInner {
    pool: SqlitePool,
    cart_changes: TableWatcher,
    order_changes: TableWatcher,
    favorite_changes: TableWatcher,
}

impl Database {
    /// Open (creating if missing) the database at `path` and run migrations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the pool cannot be created or a
    /// migration fails.
    pub async fn connect(path: &Path) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// In-memory database for tests. A single connection keeps every query
    /// on the same memory store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the pool cannot be created or a
    /// migration fails.
    pub async fn in_memory() -> Result<Self, RepositoryError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, RepositoryError> {
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                pool,
                cart_changes: TableWatcher::new(),
                order_changes: TableWatcher::new(),
                favorite_changes: TableWatcher::new(),
            }),
        })
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Change notifier for `cart_items`.
    #[must_use]
    pub fn cart_changes(&self) -> &TableWatcher {
        &self.inner.cart_changes
    }

    /// Change notifier for `orders`.
    #[must_use]
    pub fn order_changes(&self) -> &TableWatcher {
        &self.inner.order_changes
    }

    /// Change notifier for `favorites`.
    #[must_use]
    pub fn favorite_changes(&self) -> &TableWatcher {
        &self.inner.favorite_changes
    }

    /// Cart repository bound to this database.
    #[must_use]
    pub fn cart(&self) -> CartRepository {
        CartRepository::new(self.clone())
    }

    /// Order repository bound to this database.
    #[must_use]
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.clone())
    }

    /// Favorite repository bound to this database.
    #[must_use]
    pub fn favorites(&self) -> FavoriteRepository {
        FavoriteRepository::new(self.clone())
    }
}
