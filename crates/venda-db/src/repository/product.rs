//! # Product Repository
//!
//! Database operations for products, including the atomic stock
//! reservation used by the order-placement transaction.
//!
//! ## Stock Mutation Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Who Touches stock_millis                        │
//! │                                                                 │
//! │  reserve_stock()  — guarded decrement, ONLY inside an order     │
//! │                     placement transaction                       │
//! │  set_stock() /    — absolute set, the independent product       │
//! │  update()           registry path (restock, correction)         │
//! │                                                                 │
//! │  Nothing else. Orchestration code never read-modify-writes      │
//! │  the stock counter.                                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult, OrderResult};
use venda_core::{CoreError, Product, Quantity};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, maker, metric, label, image,
                   stock_millis, price_cents, purchase_price_cents,
                   created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, maker, metric, label, image,
                stock_millis, price_cents, purchase_price_cents,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.maker)
        .bind(product.metric)
        .bind(&product.label)
        .bind(&product.image)
        .bind(product.stock_millis)
        .bind(product.price_cents)
        .bind(product.purchase_price_cents)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product, including an absolute stock set.
    ///
    /// This is the independent registry path; it is never called from the
    /// placement transaction. Order items placed earlier keep their product
    /// snapshot.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                maker = ?4,
                metric = ?5,
                label = ?6,
                image = ?7,
                stock_millis = ?8,
                price_cents = ?9,
                purchase_price_cents = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.maker)
        .bind(product.metric)
        .bind(&product.label)
        .bind(&product.image)
        .bind(product.stock_millis)
        .bind(product.price_cents)
        .bind(product.purchase_price_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Sets the stock level to an absolute value (restock / correction).
    pub async fn set_stock(&self, id: &str, stock: Quantity) -> DbResult<()> {
        debug!(id = %id, stock = %stock, "Setting stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                stock_millis = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(stock.millis())
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product. Historical order items survive with `product_id`
    /// NULL and their snapshot columns intact.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Reserves stock for one order line, inside the caller's transaction.
    ///
    /// ## How It Works
    /// 1. Reads the product row (the pre-decrement snapshot the pricing
    ///    calculator and the denormalized item columns need)
    /// 2. Runs a *guarded* decrement:
    ///    `UPDATE ... SET stock = stock − q WHERE id = ? AND stock >= q`
    ///
    /// The check and the decrement are one statement, so two reservations
    /// against the same product can never both pass a stale check: the
    /// second either sees the decremented stock or fails the guard and the
    /// whole transaction rolls back.
    ///
    /// ## Errors
    /// * `CoreError::ProductNotFound` - no such product
    /// * `CoreError::InsufficientStock` - guard failed; message carries the
    ///   product name and the available/requested amounts
    pub async fn reserve_stock(
        tx: &mut Transaction<'_, Sqlite>,
        product_id: &str,
        requested: Quantity,
    ) -> OrderResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, maker, metric, label, image,
                   stock_millis, price_cents, purchase_price_cents,
                   created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                stock_millis = stock_millis - ?2,
                updated_at = ?3
            WHERE id = ?1 AND stock_millis >= ?2
            "#,
        )
        .bind(product_id)
        .bind(requested.millis())
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock(),
                requested,
            }
            .into());
        }

        debug!(
            product_id = %product_id,
            requested = %requested,
            available = %product.stock(),
            "Stock reserved"
        );

        Ok(product)
    }

    /// Counts products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
