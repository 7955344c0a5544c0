//! Favorite repository.
//!
//! Favorite existence is purely the presence or absence of a row keyed by
//! product id; re-adding an existing favorite replaces the row.

use bazaar_core::{Price, ProductId};
use sqlx::FromRow;

use super::{Database, RepositoryError};
use crate::models::{FavoriteMark, Product};

#[derive(FromRow)]
struct FavoriteRow {
    product_id: String,
    name: String,
    brand: String,
    price: String,
    image_url: String,
    favorited_at: i64,
}

impl From<FavoriteRow> for FavoriteMark {
    fn from(row: FavoriteRow) -> Self {
        Self {
            product_id: row.product_id.into(),
            name: row.name,
            brand: row.brand,
            price: Price::new(row.price),
            image_url: row.image_url,
            favorited_at: row.favorited_at,
        }
    }
}

/// Repository for favorite operations.
#[derive(Clone)]
pub struct FavoriteRepository {
    db: Database,
}

impl FavoriteRepository {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// All favorites, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<Vec<FavoriteMark>, RepositoryError> {
        let rows: Vec<FavoriteRow> =
            sqlx::query_as("SELECT * FROM favorites ORDER BY favorited_at DESC")
                .fetch_all(self.db.pool())
                .await?;

        Ok(rows.into_iter().map(FavoriteMark::from).collect())
    }

    /// Whether a product is currently favorited. A point-in-time snapshot
    /// read, not a stream.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_favorite(&self, product_id: &ProductId) -> Result<bool, RepositoryError> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM favorites WHERE product_id = ?)")
                .bind(product_id.as_str())
                .fetch_one(self.db.pool())
                .await?;
        Ok(exists != 0)
    }

    /// Mark a product as favorite. Replaces any existing mark for the same
    /// product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(&self, product: &Product) -> Result<FavoriteMark, RepositoryError> {
        let mark = FavoriteMark::for_product(product);

        sqlx::query(
            "INSERT OR REPLACE INTO favorites \
             (product_id, name, brand, price, image_url, favorited_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(mark.product_id.as_str())
        .bind(&mark.name)
        .bind(&mark.brand)
        .bind(mark.price.as_str())
        .bind(&mark.image_url)
        .bind(mark.favorited_at)
        .execute(self.db.pool())
        .await?;

        self.db.favorite_changes().mark_changed();
        Ok(mark)
    }

    /// Remove a product's favorite mark. Removing an absent mark is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(&self, product_id: &ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM favorites WHERE product_id = ?")
            .bind(product_id.as_str())
            .execute(self.db.pool())
            .await?;

        self.db.favorite_changes().mark_changed();
        Ok(())
    }

    /// Number of favorited products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }

    /// Subscribe to favorite table changes.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.db.favorite_changes().subscribe()
    }
}
