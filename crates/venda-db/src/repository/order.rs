//! # Order Repository
//!
//! The order-placement transaction and the order read/write operations.
//!
//! ## Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  place_order(request)                           │
//! │                                                                 │
//! │  1. VALIDATE request shape          (no transaction yet)        │
//! │  2. BEGIN transaction                                           │
//! │  3. LOAD client                     → NotFound aborts           │
//! │  4. For each line, IN LIST ORDER:                               │
//! │       reserve_stock()               → NotFound /                │
//! │       (snapshot before decrement)     InsufficientStock abort   │
//! │  5. PRICE lines + aggregate totals  (pure, venda-core)          │
//! │  6. INSERT order + order_items      (snapshot columns)          │
//! │  7. COMMIT                          → order                     │
//! │                                                                 │
//! │  Any failure in 3-6 drops the transaction: sqlx rolls it back,  │
//! │  so no order row, no item rows, and no stock decrement survive. │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Duplicate product ids in one request are intentional: each line reserves
//! independently, in order, against the same stock counter, so the second
//! line may fail after the first succeeded (and then both roll back).

use chrono::Utc;
use sqlx::{Connection, Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult, OrderResult};
use crate::repository::product::ProductRepository;
use venda_core::{
    price_item, total_order, validation, Client, CoreError, ItemPricing, Money, Order, OrderItem,
    OrderStatus, OrderWithItems, PlaceOrderRequest, Product,
};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Places an order: the single all-or-nothing unit that checks stock,
    /// prices the lines, persists the order with its items, and decrements
    /// inventory.
    ///
    /// ## Returns
    /// The persisted [`Order`] (status `Pending`), with every aggregate
    /// figure exactly as computed.
    ///
    /// ## Errors
    /// * `OrderError::Domain` - validation, unknown client/product, or
    ///   insufficient stock; the request can be corrected and retried
    /// * `OrderError::Storage` - storage failure; the transaction was
    ///   rolled back and the caller may retry as-is
    pub async fn place_order(&self, req: &PlaceOrderRequest) -> OrderResult<Order> {
        // Shape check before any transaction opens.
        validation::validate_place_order(req).map_err(CoreError::from)?;

        let discount = Money::from_cents(req.discount_cents.unwrap_or(0));
        let tax = Money::from_cents(req.tax_cents.unwrap_or(0));

        debug!(
            client_id = %req.client_id,
            lines = req.items.len(),
            "Placing order"
        );

        // BEGIN IMMEDIATE, not the default deferred transaction: the flow
        // reads (client, product snapshots) before its first write, and a
        // deferred transaction that upgrades read → write under WAL fails
        // straight away with "database is locked" when another writer got
        // there first; the busy timeout only covers acquiring the write
        // lock up front. Starting immediate makes contending placements
        // queue instead, so losers see the committed stock and fail with
        // InsufficientStock rather than a storage error.
        let mut conn = self.pool.acquire().await.map_err(DbError::from)?;
        let mut tx = conn
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(DbError::from)?;

        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, establishment_type, phone, maps_link,
                   created_at, updated_at
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(&req.client_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| CoreError::ClientNotFound(req.client_id.clone()))?;

        // Reserve stock line by line, in the order given. Each reservation
        // returns the pre-decrement product snapshot used for pricing and
        // for the denormalized item columns.
        let mut lines: Vec<(Product, ItemPricing)> = Vec::with_capacity(req.items.len());
        for line in &req.items {
            let requested = line.quantity();
            let snapshot =
                ProductRepository::reserve_stock(&mut tx, &line.product_id, requested).await?;
            let pricing = price_item(
                snapshot.price(),
                snapshot.purchase_price_cents.map(Money::from_cents),
                requested,
            );
            lines.push((snapshot, pricing));
        }

        let pricings: Vec<ItemPricing> = lines.iter().map(|(_, p)| *p).collect();
        let totals = total_order(&pricings, discount, tax);

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            client_id: Some(client.id.clone()),
            client_name: client.name.clone(),
            client_establishment_type: client.establishment_type.clone(),
            client_phone: client.phone.clone(),
            status: OrderStatus::Pending,
            subtotal_cents: totals.subtotal.cents(),
            discount_cents: discount.cents(),
            tax_cents: tax.cents(),
            total_cents: totals.total.cents(),
            notes: req.notes.clone(),
            total_purchase_cost_cents: totals.total_purchase_cost.cents(),
            total_profit_cents: totals.total_profit.cents(),
            profit_margin_bps: totals.profit_margin_bps,
            created_at: now,
        };

        insert_order(&mut tx, &order).await?;

        for (snapshot, pricing) in &lines {
            let item = OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order.id.clone(),
                product_id: Some(snapshot.id.clone()),
                name_snapshot: snapshot.name.clone(),
                description_snapshot: snapshot.description.clone(),
                maker_snapshot: snapshot.maker.clone(),
                metric_snapshot: snapshot.metric,
                label_snapshot: snapshot.label.clone(),
                image_snapshot: snapshot.image.clone(),
                unit_price_cents: pricing.unit_price.cents(),
                quantity_millis: pricing.quantity.millis(),
                subtotal_cents: pricing.subtotal.cents(),
                unit_purchase_price_cents: pricing.unit_purchase_price.cents(),
                unit_profit_cents: pricing.unit_profit.cents(),
                total_profit_cents: pricing.total_profit.cents(),
                created_at: now,
            };
            insert_order_item(&mut tx, &item).await?;
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(
            order_id = %order.id,
            client = %order.client_name,
            total = %totals.total,
            profit = %totals.total_profit,
            "Order placed"
        );

        Ok(order)
    }

    // =========================================================================
    // Status Update
    // =========================================================================

    /// Updates an order's status. No side effects on stock or pricing.
    pub async fn update_status(&self, order_id: &str, status: OrderStatus) -> OrderResult<()> {
        debug!(order_id = %order_id, status = status.as_str(), "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
            .bind(order_id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::OrderNotFound(order_id.to_string()).into());
        }

        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, client_id, client_name, client_establishment_type,
                   client_phone, status, subtotal_cents, discount_cents,
                   tax_cents, total_cents, notes, total_purchase_cost_cents,
                   total_profit_cents, profit_margin_bps, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all items for an order, in insertion order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, name_snapshot,
                   description_snapshot, maker_snapshot, metric_snapshot,
                   label_snapshot, image_snapshot, unit_price_cents,
                   quantity_millis, subtotal_cents, unit_purchase_price_cents,
                   unit_profit_cents, total_profit_cents, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an order together with its items. The profit fields round-trip
    /// exactly as computed at placement time.
    pub async fn get_with_items(&self, order_id: &str) -> OrderResult<OrderWithItems> {
        let order = self
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;
        let items = self.get_items(order_id).await?;

        Ok(OrderWithItems { order, items })
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    /// Deletes an order; its items go with it (cascade).
    ///
    /// Idempotent: returns the deleted id, or `None` when no such order
    /// existed - both are success.
    ///
    /// Deliberately does NOT restock the referenced products: a deleted
    /// order is treated as a cancelled-and-accounted-for sale, not an
    /// inventory return. Restocking, when wanted, is an explicit
    /// `set_stock` on the product registry.
    pub async fn delete(&self, order_id: &str) -> DbResult<Option<String>> {
        debug!(order_id = %order_id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        Ok((result.rows_affected() > 0).then(|| order_id.to_string()))
    }

    /// Counts orders (for diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Row Inserts (transaction-scoped)
// =============================================================================

async fn insert_order(tx: &mut Transaction<'_, Sqlite>, order: &Order) -> OrderResult<()> {
    sqlx::query(
        r#"
        INSERT INTO orders (
            id, client_id, client_name, client_establishment_type,
            client_phone, status, subtotal_cents, discount_cents,
            tax_cents, total_cents, notes, total_purchase_cost_cents,
            total_profit_cents, profit_margin_bps, created_at
        ) VALUES (
            ?1, ?2, ?3, ?4,
            ?5, ?6, ?7, ?8,
            ?9, ?10, ?11, ?12,
            ?13, ?14, ?15
        )
        "#,
    )
    .bind(&order.id)
    .bind(&order.client_id)
    .bind(&order.client_name)
    .bind(&order.client_establishment_type)
    .bind(&order.client_phone)
    .bind(order.status)
    .bind(order.subtotal_cents)
    .bind(order.discount_cents)
    .bind(order.tax_cents)
    .bind(order.total_cents)
    .bind(&order.notes)
    .bind(order.total_purchase_cost_cents)
    .bind(order.total_profit_cents)
    .bind(order.profit_margin_bps)
    .bind(order.created_at)
    .execute(&mut **tx)
    .await
    .map_err(DbError::from)?;

    Ok(())
}

async fn insert_order_item(tx: &mut Transaction<'_, Sqlite>, item: &OrderItem) -> OrderResult<()> {
    sqlx::query(
        r#"
        INSERT INTO order_items (
            id, order_id, product_id, name_snapshot,
            description_snapshot, maker_snapshot, metric_snapshot,
            label_snapshot, image_snapshot, unit_price_cents,
            quantity_millis, subtotal_cents, unit_purchase_price_cents,
            unit_profit_cents, total_profit_cents, created_at
        ) VALUES (
            ?1, ?2, ?3, ?4,
            ?5, ?6, ?7, ?8,
            ?9, ?10, ?11, ?12,
            ?13, ?14, ?15, ?16
        )
        "#,
    )
    .bind(&item.id)
    .bind(&item.order_id)
    .bind(&item.product_id)
    .bind(&item.name_snapshot)
    .bind(&item.description_snapshot)
    .bind(&item.maker_snapshot)
    .bind(item.metric_snapshot)
    .bind(&item.label_snapshot)
    .bind(&item.image_snapshot)
    .bind(item.unit_price_cents)
    .bind(item.quantity_millis)
    .bind(item.subtotal_cents)
    .bind(item.unit_purchase_price_cents)
    .bind(item.unit_profit_cents)
    .bind(item.total_profit_cents)
    .bind(item.created_at)
    .execute(&mut **tx)
    .await
    .map_err(DbError::from)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrderError;
    use crate::pool::{Database, DbConfig};
    use venda_core::{Metric, OrderItemRequest, ValidationError};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_client(db: &Database) -> String {
        let now = Utc::now();
        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: "Padaria Central".to_string(),
            establishment_type: "bakery".to_string(),
            phone: "555-0100".to_string(),
            maps_link: Some("https://maps.example/padaria".to_string()),
            created_at: now,
            updated_at: now,
        };
        db.clients().insert(&client).await.unwrap();
        client.id
    }

    async fn seed_product(
        db: &Database,
        name: &str,
        price_cents: i64,
        purchase_price_cents: Option<i64>,
        stock_millis: i64,
    ) -> String {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            maker: "Moinho Sul".to_string(),
            metric: Metric::Kilogram,
            label: Some("baking".to_string()),
            image: None,
            stock_millis,
            price_cents,
            purchase_price_cents,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product.id
    }

    fn request(client_id: &str, lines: &[(&str, i64)]) -> PlaceOrderRequest {
        PlaceOrderRequest {
            client_id: client_id.to_string(),
            items: lines
                .iter()
                .map(|(product_id, quantity_millis)| OrderItemRequest {
                    product_id: product_id.to_string(),
                    quantity_millis: *quantity_millis,
                })
                .collect(),
            discount_cents: None,
            tax_cents: None,
            notes: None,
        }
    }

    async fn stock_of(db: &Database, product_id: &str) -> i64 {
        db.products()
            .get_by_id(product_id)
            .await
            .unwrap()
            .unwrap()
            .stock_millis
    }

    // -------------------------------------------------------------------------
    // Happy paths
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn place_order_without_purchase_price() {
        // price $50.00, no purchase price, stock 100.500, qty 2
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        let product_id = seed_product(&db, "Flour", 5000, None, 100_500).await;

        let order = db
            .orders()
            .place_order(&request(&client_id, &[(&product_id, 2000)]))
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.subtotal_cents, 10_000);
        assert_eq!(order.total_purchase_cost_cents, 0);
        assert_eq!(order.total_profit_cents, 10_000);
        assert_eq!(order.profit_margin_bps, 10_000); // 100%
        assert_eq!(stock_of(&db, &product_id).await, 98_500);
    }

    #[tokio::test]
    async fn place_order_with_purchase_price() {
        // price $80.00, purchase $50.00, stock 50.250, qty 2
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        let product_id = seed_product(&db, "Butter", 8000, Some(5000), 50_250).await;

        let order = db
            .orders()
            .place_order(&request(&client_id, &[(&product_id, 2000)]))
            .await
            .unwrap();

        assert_eq!(order.subtotal_cents, 16_000);
        assert_eq!(order.total_purchase_cost_cents, 10_000);
        assert_eq!(order.total_profit_cents, 6_000);
        assert_eq!(order.profit_margin_bps, 3_750); // 37.5%
        assert_eq!(stock_of(&db, &product_id).await, 48_250);
    }

    #[tokio::test]
    async fn place_order_with_two_products() {
        // A: price $50, no purchase price, qty 1
        // B: price $80, purchase $50, qty 1
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        let a = seed_product(&db, "Flour", 5000, None, 10_000).await;
        let b = seed_product(&db, "Butter", 8000, Some(5000), 10_000).await;

        let order = db
            .orders()
            .place_order(&request(&client_id, &[(&a, 1000), (&b, 1000)]))
            .await
            .unwrap();

        assert_eq!(order.subtotal_cents, 13_000);
        assert_eq!(order.total_purchase_cost_cents, 5_000);
        assert_eq!(order.total_profit_cents, 8_000);

        let items = db.orders().get_items(&order.id).await.unwrap();
        assert_eq!(items.len(), 2);
        // Items persist in list order with their product snapshots.
        assert_eq!(items[0].name_snapshot, "Flour");
        assert_eq!(items[1].name_snapshot, "Butter");
        assert_eq!(items[1].unit_profit_cents, 3000);
    }

    #[tokio::test]
    async fn place_order_keeps_client_snapshot_and_notes() {
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        let product_id = seed_product(&db, "Flour", 5000, None, 10_000).await;

        let mut req = request(&client_id, &[(&product_id, 1000)]);
        req.discount_cents = Some(500);
        req.tax_cents = Some(300);
        req.notes = Some("deliver before noon".to_string());

        let order = db.orders().place_order(&req).await.unwrap();

        assert_eq!(order.client_name, "Padaria Central");
        assert_eq!(order.client_establishment_type, "bakery");
        assert_eq!(order.client_phone, "555-0100");
        assert_eq!(order.notes.as_deref(), Some("deliver before noon"));
        // total = subtotal − discount + tax; profit untouched by either.
        assert_eq!(order.total_cents, 5000 - 500 + 300);
        assert_eq!(order.total_profit_cents, 5000);
    }

    #[tokio::test]
    async fn get_with_items_round_trips_profit_fields() {
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        let product_id = seed_product(&db, "Butter", 8000, Some(5000), 10_000).await;

        let placed = db
            .orders()
            .place_order(&request(&client_id, &[(&product_id, 2000)]))
            .await
            .unwrap();

        let loaded = db.orders().get_with_items(&placed.id).await.unwrap();

        assert_eq!(loaded.order.subtotal_cents, placed.subtotal_cents);
        assert_eq!(loaded.order.total_profit_cents, placed.total_profit_cents);
        assert_eq!(loaded.order.profit_margin_bps, placed.profit_margin_bps);
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].subtotal_cents, 16_000);
        assert_eq!(loaded.items[0].total_profit_cents, 6_000);
        assert_eq!(loaded.items[0].metric_snapshot, Metric::Kilogram);

        let err = db.orders().get_with_items("ghost").await.unwrap_err();
        assert!(matches!(
            err,
            OrderError::Domain(CoreError::OrderNotFound(_))
        ));
    }

    // -------------------------------------------------------------------------
    // Failure paths: atomicity
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn validation_failure_rejects_before_storage() {
        let db = test_db().await;
        let client_id = seed_client(&db).await;

        let req = request(&client_id, &[]);
        let err = db.orders().place_order(&req).await.unwrap_err();

        assert!(matches!(
            err,
            OrderError::Domain(CoreError::Validation(ValidationError::Empty { .. }))
        ));
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_client_aborts() {
        let db = test_db().await;
        let product_id = seed_product(&db, "Flour", 5000, None, 10_000).await;

        let err = db
            .orders()
            .place_order(&request("ghost-client", &[(&product_id, 1000)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OrderError::Domain(CoreError::ClientNotFound(_))
        ));
        assert_eq!(stock_of(&db, &product_id).await, 10_000);
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insufficient_stock_aborts_and_keeps_stock() {
        // stock 100.5, requested 1000
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        let product_id = seed_product(&db, "Flour", 5000, None, 100_500).await;

        let err = db
            .orders()
            .place_order(&request(&client_id, &[(&product_id, 1_000_000)]))
            .await
            .unwrap_err();

        match err {
            OrderError::Domain(CoreError::InsufficientStock {
                product, available, ..
            }) => {
                assert_eq!(product, "Flour");
                assert_eq!(available.millis(), 100_500);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(stock_of(&db, &product_id).await, 100_500);
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failure_on_second_line_rolls_back_first_reservation() {
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        let a = seed_product(&db, "Flour", 5000, None, 10_000).await;

        // Second line references a product that does not exist.
        let err = db
            .orders()
            .place_order(&request(&client_id, &[(&a, 1000), ("ghost", 1000)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OrderError::Domain(CoreError::ProductNotFound(_))
        ));
        // The first line's decrement did not survive.
        assert_eq!(stock_of(&db, &a).await, 10_000);
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_lines_consume_the_same_counter_sequentially() {
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        // stock: 3 units
        let product_id = seed_product(&db, "Flour", 5000, None, 3000).await;

        // 2 + 2 units: second line fails, everything rolls back.
        let err = db
            .orders()
            .place_order(&request(&client_id, &[(&product_id, 2000), (&product_id, 2000)]))
            .await
            .unwrap_err();
        match err {
            OrderError::Domain(CoreError::InsufficientStock { available, .. }) => {
                // The second line saw the first line's decrement.
                assert_eq!(available.millis(), 1000);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(stock_of(&db, &product_id).await, 3000);

        // 2 + 1 units fits exactly; both lines persist separately.
        let order = db
            .orders()
            .place_order(&request(&client_id, &[(&product_id, 2000), (&product_id, 1000)]))
            .await
            .unwrap();
        let items = db.orders().get_items(&order.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(order.subtotal_cents, 15_000);
        assert_eq!(stock_of(&db, &product_id).await, 0);
    }

    // -------------------------------------------------------------------------
    // Concurrency
    // -------------------------------------------------------------------------

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_placements_never_oversell() {
        // A file-backed database with a multi-connection pool, so the eight
        // placements below really run on parallel connections. With a
        // deferred transaction this scenario fails with "database is
        // locked" on the read-to-write upgrade; BEGIN IMMEDIATE makes the
        // losers queue and fail with InsufficientStock instead.
        let path = std::env::temp_dir().join(format!("venda-oversell-{}.db", Uuid::new_v4()));
        let db = Database::new(DbConfig::new(&path).max_connections(8))
            .await
            .unwrap();
        let client_id = seed_client(&db).await;
        // stock: 5 units; 8 concurrent orders of 1 unit each
        let product_id = seed_product(&db, "Flour", 5000, None, 5000).await;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            let req = request(&client_id, &[(&product_id, 1000)]);
            handles.push(tokio::spawn(
                async move { db.orders().place_order(&req).await },
            ));
        }

        let mut successes = 0;
        let mut insufficient = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(OrderError::Domain(CoreError::InsufficientStock { .. })) => insufficient += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(successes, 5);
        assert_eq!(insufficient, 3);
        assert_eq!(stock_of(&db, &product_id).await, 0);
        assert_eq!(db.orders().count().await.unwrap(), 5);

        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(path.with_extension(format!("db{suffix}")));
        }
    }

    // -------------------------------------------------------------------------
    // Status update / deletion
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn update_status_transitions_and_not_found() {
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        let product_id = seed_product(&db, "Flour", 5000, None, 10_000).await;

        let order = db
            .orders()
            .place_order(&request(&client_id, &[(&product_id, 1000)]))
            .await
            .unwrap();

        db.orders()
            .update_status(&order.id, OrderStatus::Paid)
            .await
            .unwrap();
        let loaded = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Paid);
        // Stock untouched by the status change.
        assert_eq!(stock_of(&db, &product_id).await, 9_000);

        let err = db
            .orders()
            .update_status("ghost", OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::Domain(CoreError::OrderNotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_is_idempotent_cascades_and_does_not_restock() {
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        let product_id = seed_product(&db, "Flour", 5000, None, 10_000).await;

        let order = db
            .orders()
            .place_order(&request(&client_id, &[(&product_id, 2000)]))
            .await
            .unwrap();
        assert_eq!(stock_of(&db, &product_id).await, 8_000);

        let deleted = db.orders().delete(&order.id).await.unwrap();
        assert_eq!(deleted.as_deref(), Some(order.id.as_str()));

        // Items cascaded away; stock stays decremented (recorded policy).
        assert!(db.orders().get_by_id(&order.id).await.unwrap().is_none());
        assert!(db.orders().get_items(&order.id).await.unwrap().is_empty());
        assert_eq!(stock_of(&db, &product_id).await, 8_000);

        // Second delete is success with a null result.
        let deleted = db.orders().delete(&order.id).await.unwrap();
        assert_eq!(deleted, None);
    }

    #[tokio::test]
    async fn client_deletion_nullifies_reference_but_keeps_snapshot() {
        let db = test_db().await;
        let client_id = seed_client(&db).await;
        let product_id = seed_product(&db, "Flour", 5000, None, 10_000).await;

        let order = db
            .orders()
            .place_order(&request(&client_id, &[(&product_id, 1000)]))
            .await
            .unwrap();

        db.clients().delete(&client_id).await.unwrap();

        let loaded = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.client_id, None);
        assert_eq!(loaded.client_name, "Padaria Central");
        assert_eq!(loaded.client_phone, "555-0100");
    }
}
