//! Cart repository.
//!
//! Lines are keyed by a synthetic UUID, not the product id: adding a product
//! that is already in the cart inserts a second line rather than incrementing
//! the existing one. Quantity has no floor here; the UI layer is responsible
//! for refusing decrements below 1.

use bazaar_core::{OrderNumber, OrderStatus, Price, ProductId};
use chrono::Utc;
use sqlx::FromRow;
use uuid::Uuid;

use super::{Database, RepositoryError};
use crate::models::{CartLine, Product};

#[derive(FromRow)]
struct CartRow {
    id: String,
    product_id: String,
    product_name: String,
    product_image: String,
    product_price: String,
    product_brand: String,
    quantity: i64,
    added_at: i64,
}

impl From<CartRow> for CartLine {
    fn from(row: CartRow) -> Self {
        Self {
            id: row.id.into(),
            product_id: row.product_id.into(),
            product_name: row.product_name,
            product_image: row.product_image,
            product_price: Price::new(row.product_price),
            product_brand: row.product_brand,
            quantity: row.quantity,
            added_at: row.added_at,
        }
    }
}

/// Repository for cart operations.
#[derive(Clone)]
pub struct CartRepository {
    db: Database,
}

impl CartRepository {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// All cart lines, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<Vec<CartLine>, RepositoryError> {
        let rows: Vec<CartRow> =
            sqlx::query_as("SELECT * FROM cart_items ORDER BY added_at DESC")
                .fetch_all(self.db.pool())
                .await?;

        Ok(rows.into_iter().map(CartLine::from).collect())
    }

    /// The first cart line for a product, if any. An absent line is
    /// `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, product_id: &ProductId) -> Result<Option<CartLine>, RepositoryError> {
        let row: Option<CartRow> =
            sqlx::query_as("SELECT * FROM cart_items WHERE product_id = ?")
                .bind(product_id.as_str())
                .fetch_optional(self.db.pool())
                .await?;

        Ok(row.map(CartLine::from))
    }

    /// Add a product to the cart as a new quantity-1 line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(&self, product: &Product) -> Result<CartLine, RepositoryError> {
        let line = CartLine::for_product(product);

        sqlx::query(
            "INSERT INTO cart_items \
             (id, product_id, product_name, product_image, product_price, product_brand, quantity, added_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(line.id.as_str())
        .bind(line.product_id.as_str())
        .bind(&line.product_name)
        .bind(&line.product_image)
        .bind(line.product_price.as_str())
        .bind(&line.product_brand)
        .bind(line.quantity)
        .bind(line.added_at)
        .execute(self.db.pool())
        .await?;

        self.db.cart_changes().mark_changed();
        Ok(line)
    }

    /// Set the quantity of every line for a product. No floor is enforced
    /// here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_quantity(
        &self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE cart_items SET quantity = ? WHERE product_id = ?")
            .bind(quantity)
            .bind(product_id.as_str())
            .execute(self.db.pool())
            .await?;

        self.db.cart_changes().mark_changed();
        Ok(())
    }

    /// Remove every line for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(&self, product_id: &ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE product_id = ?")
            .bind(product_id.as_str())
            .execute(self.db.pool())
            .await?;

        self.db.cart_changes().mark_changed();
        Ok(())
    }

    /// Delete all cart lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items")
            .execute(self.db.pool())
            .await?;

        self.db.cart_changes().mark_changed();
        Ok(())
    }

    /// Number of cart lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }

    /// Cart total, computed database-side as
    /// `SUM(CAST(product_price AS REAL) * quantity)`. Non-numeric price text
    /// casts to 0. An empty cart totals 0.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn total_amount(&self) -> Result<f64, RepositoryError> {
        let total: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(CAST(product_price AS REAL) * quantity), 0.0) FROM cart_items",
        )
        .fetch_one(self.db.pool())
        .await?;
        Ok(total)
    }

    /// Place an order from the current cart contents.
    ///
    /// Snapshots the lines and total, inserts the order, and clears the cart
    /// inside a single transaction, so a concurrent cart write cannot leave a
    /// placed order alongside a stale cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::EmptyCart` if the cart has no lines, or
    /// `RepositoryError::Database`/`Serialization` on failure. On error the
    /// transaction rolls back and the cart is untouched.
    pub async fn place_order(&self) -> Result<OrderNumber, RepositoryError> {
        let mut tx = self.db.pool().begin().await?;

        let rows: Vec<CartRow> =
            sqlx::query_as("SELECT * FROM cart_items ORDER BY added_at DESC")
                .fetch_all(&mut *tx)
                .await?;

        if rows.is_empty() {
            return Err(RepositoryError::EmptyCart);
        }

        let total: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(CAST(product_price AS REAL) * quantity), 0.0) FROM cart_items",
        )
        .fetch_one(&mut *tx)
        .await?;

        let lines: Vec<CartLine> = rows.into_iter().map(CartLine::from).collect();
        let now = Utc::now().timestamp_millis();
        let order_number = OrderNumber::from_timestamp_millis(now);
        let items = serde_json::to_string(&lines)?;

        sqlx::query(
            "INSERT INTO orders (id, order_number, items, total_amount, order_date, status) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(order_number.as_str())
        .bind(&items)
        .bind(total)
        .bind(now)
        .bind(OrderStatus::Pending.to_string())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM cart_items").execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(order_number = %order_number, total, "order placed");
        self.db.cart_changes().mark_changed();
        self.db.order_changes().mark_changed();

        Ok(order_number)
    }

    /// Subscribe to cart table changes.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.db.cart_changes().subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::Price;

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            image: String::new(),
            price: Price::new(price),
            description: String::new(),
            model: String::new(),
            brand: String::new(),
            created_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_add_then_total_is_price_times_one() {
        let db = Database::in_memory().await.unwrap();
        let cart = db.cart();

        cart.add(&product("1", "19.99")).await.unwrap();

        assert_eq!(cart.count().await.unwrap(), 1);
        assert!((cart.total_amount().await.unwrap() - 19.99).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_duplicate_add_creates_second_line() {
        let db = Database::in_memory().await.unwrap();
        let cart = db.cart();
        let p = product("1", "10");

        cart.add(&p).await.unwrap();
        cart.add(&p).await.unwrap();

        let lines = cart.all().await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_ne!(lines[0].id, lines[1].id);
        assert!(lines.iter().all(|line| line.quantity == 1));
    }

    #[tokio::test]
    async fn test_update_quantity_has_no_floor() {
        let db = Database::in_memory().await.unwrap();
        let cart = db.cart();
        let p = product("1", "10");

        cart.add(&p).await.unwrap();
        cart.update_quantity(&p.id, 0).await.unwrap();

        let line = cart.get(&p.id).await.unwrap().unwrap();
        assert_eq!(line.quantity, 0);
    }

    #[tokio::test]
    async fn test_total_ignores_non_numeric_prices() {
        let db = Database::in_memory().await.unwrap();
        let cart = db.cart();

        cart.add(&product("1", "abc")).await.unwrap();
        cart.add(&product("2", "5")).await.unwrap();
        cart.update_quantity(&ProductId::new("2"), 3).await.unwrap();

        assert!((cart.total_amount().await.unwrap() - 15.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_place_order_snapshots_cart_and_clears_it() {
        let db = Database::in_memory().await.unwrap();
        let cart = db.cart();
        let orders = db.orders();

        cart.add(&product("1", "10")).await.unwrap();
        cart.add(&product("2", "2.5")).await.unwrap();
        let before = cart.all().await.unwrap();

        let order_number = cart.place_order().await.unwrap();

        assert!(cart.all().await.unwrap().is_empty());
        let placed = orders.all().await.unwrap();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].order_number, order_number);
        assert_eq!(placed[0].items, before);
        assert!((placed[0].total_amount - 12.5).abs() < 1e-9);
        assert_eq!(placed[0].status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_place_order_rejects_empty_cart() {
        let db = Database::in_memory().await.unwrap();

        let result = db.cart().place_order().await;
        assert!(matches!(result, Err(RepositoryError::EmptyCart)));
        assert!(db.orders().all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let db = Database::in_memory().await.unwrap();
        let cart = db.cart();

        cart.add(&product("1", "1")).await.unwrap();
        cart.add(&product("2", "2")).await.unwrap();

        cart.remove(&ProductId::new("1")).await.unwrap();
        assert_eq!(cart.count().await.unwrap(), 1);

        cart.clear().await.unwrap();
        assert_eq!(cart.count().await.unwrap(), 0);
        assert!(cart.get(&ProductId::new("2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_writes_bump_change_counter() {
        let db = Database::in_memory().await.unwrap();
        let cart = db.cart();
        let mut changes = cart.subscribe();
        changes.borrow_and_update();

        cart.add(&product("1", "1")).await.unwrap();
        assert!(changes.has_changed().unwrap());
    }
}
