//! Order repository.
//!
//! Orders are written by [`super::CartRepository::place_order`]; this
//! repository covers the order history screen: listing, status updates, and
//! deletion.

use bazaar_core::{OrderId, OrderStatus};
use sqlx::FromRow;

use super::{Database, RepositoryError};
use crate::models::{CartLine, Order};

#[derive(FromRow)]
struct OrderRow {
    id: String,
    order_number: String,
    items: String,
    total_amount: f64,
    order_date: i64,
    status: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<CartLine> = serde_json::from_str(&row.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order snapshot: {e}"))
        })?;
        let status: OrderStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Self {
            id: row.id.into(),
            order_number: row.order_number.into(),
            items,
            total_amount: row.total_amount,
            order_date: row.order_date,
            status,
        })
    }
}

/// Repository for order history operations.
#[derive(Clone)]
pub struct OrderRepository {
    db: Database,
}

impl OrderRepository {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored snapshot is invalid.
    pub async fn all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> =
            sqlx::query_as("SELECT * FROM orders ORDER BY order_date DESC")
                .fetch_all(self.db.pool())
                .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// One order by id. An absent order is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored snapshot is invalid.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as("SELECT * FROM orders WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(self.db.pool())
            .await?;

        row.map(Order::try_from).transpose()
    }

    /// Update an order's status. Everything else about a placed order is an
    /// immutable snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id.as_str())
            .execute(self.db.pool())
            .await?;

        self.db.order_changes().mark_changed();
        Ok(())
    }

    /// Delete an order by id. Deleting an absent order is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id.as_str())
            .execute(self.db.pool())
            .await?;

        self.db.order_changes().mark_changed();
        Ok(())
    }

    /// Number of placed orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }

    /// Subscribe to order table changes.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.db.order_changes().subscribe()
    }
}
