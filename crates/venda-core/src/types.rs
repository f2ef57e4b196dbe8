//! # Domain Types
//!
//! Core domain types for Venda.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Domain Types                              │
//! │                                                                 │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐     │
//! │  │    Client     │   │    Product    │   │     Order     │     │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │     │
//! │  │  id (UUID)    │   │  id (UUID)    │   │  id (UUID)    │     │
//! │  │  name         │   │  metric       │   │  status       │     │
//! │  │  phone        │   │  stock_millis │   │  totals       │     │
//! │  └───────────────┘   │  price_cents  │   │  client snap  │     │
//! │                      └───────────────┘   └───────┬───────┘     │
//! │                                                  │ 1..N        │
//! │                                          ┌───────▼───────┐     │
//! │                                          │   OrderItem   │     │
//! │                                          │  product snap │     │
//! │                                          └───────────────┘     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Orders carry denormalized copies of client fields, and order items carry
//! denormalized copies of product fields, captured at placement time. Later
//! edits (or deletions) of the source entity never alter order history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, Quantity};

// =============================================================================
// Metric
// =============================================================================

/// Unit of measure for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum Metric {
    /// Countable pieces.
    #[serde(rename = "unit")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "unit"))]
    Unit,
    /// Kilograms.
    #[serde(rename = "kg")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "kg"))]
    Kilogram,
    /// Grams.
    #[serde(rename = "g")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "g"))]
    Gram,
    /// Liters.
    #[serde(rename = "liter")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "liter"))]
    Liter,
}

impl Metric {
    /// The wire/storage representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Metric::Unit => "unit",
            Metric::Kilogram => "kg",
            Metric::Gram => "g",
            Metric::Liter => "liter",
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Unit
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client (customer establishment) that can place orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name of the establishment.
    pub name: String,

    /// Kind of establishment (bakery, restaurant, market, ...).
    pub establishment_type: String,

    /// Contact phone.
    pub phone: String,

    /// Optional link to the establishment on a maps service.
    pub maps_link: Option<String>,

    /// When the client was registered.
    pub created_at: DateTime<Utc>,

    /// When the client was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Optional description.
    pub description: Option<String>,

    /// Manufacturer / brand.
    pub maker: String,

    /// Unit of measure.
    pub metric: Metric,

    /// Optional category label.
    pub label: Option<String>,

    /// Optional image reference.
    pub image: Option<String>,

    /// Stock on hand, in thousandths of a unit (never negative).
    pub stock_millis: i64,

    /// Sale price in cents (always positive).
    pub price_cents: i64,

    /// Purchase (acquisition) price in cents. When present it is strictly
    /// less than `price_cents`.
    pub purchase_price_cents: Option<i64>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Sale price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Purchase price as Money; absent is treated as zero.
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents.unwrap_or(0))
    }

    /// Stock on hand as Quantity.
    #[inline]
    pub fn stock(&self) -> Quantity {
        Quantity::from_millis(self.stock_millis)
    }

    /// Derived profit per unit: `price − purchase_price`, or the full price
    /// when no purchase price is recorded.
    #[inline]
    pub fn unit_profit(&self) -> Money {
        self.price() - self.purchase_price()
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order. Orders are created `Pending` and only the status
/// is mutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting payment.
    Pending,
    /// Paid in full.
    Paid,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    /// The wire/storage representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order with its aggregate pricing figures.
///
/// The `client_*` fields are a snapshot taken at placement time; `client_id`
/// goes NULL if the client is later deleted, but the snapshot remains.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    /// Referenced client; NULL once the client is deleted.
    pub client_id: Option<String>,
    /// Client name at placement time (frozen).
    pub client_name: String,
    /// Establishment type at placement time (frozen).
    pub client_establishment_type: String,
    /// Client phone at placement time (frozen).
    pub client_phone: String,
    pub status: OrderStatus,
    /// Sum of line subtotals, in cents.
    pub subtotal_cents: i64,
    /// Informational discount (≥ 0); does not participate in profit math.
    pub discount_cents: i64,
    /// Informational tax (≥ 0); does not participate in profit math.
    pub tax_cents: i64,
    /// `subtotal − discount + tax`.
    pub total_cents: i64,
    pub notes: Option<String>,
    /// Sum of line purchase costs, in cents.
    pub total_purchase_cost_cents: i64,
    /// `subtotal − total_purchase_cost`.
    pub total_profit_cents: i64,
    /// Profit margin over subtotal, in basis points (3750 = 37.5%).
    /// Zero when the subtotal is zero.
    pub profit_margin_bps: i64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn total_profit(&self) -> Money {
        Money::from_cents(self.total_profit_cents)
    }

    /// Profit margin as a percentage for display (37.5 for 3750 bps).
    #[inline]
    pub fn profit_margin_percentage(&self) -> f64 {
        self.profit_margin_bps as f64 / 100.0
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
///
/// Uses the snapshot pattern to freeze product data at placement time.
/// Line items are immutable once created; deleting an order cascades to
/// its items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    /// Referenced product; NULL once the product is deleted.
    pub product_id: Option<String>,
    /// Product name at placement time (frozen).
    pub name_snapshot: String,
    /// Product description at placement time (frozen).
    pub description_snapshot: Option<String>,
    /// Maker at placement time (frozen).
    pub maker_snapshot: String,
    /// Unit of measure at placement time (frozen).
    pub metric_snapshot: Metric,
    /// Category label at placement time (frozen).
    pub label_snapshot: Option<String>,
    /// Image reference at placement time (frozen).
    pub image_snapshot: Option<String>,
    /// Sale price per unit at placement time, in cents.
    pub unit_price_cents: i64,
    /// Quantity ordered, in thousandths of a unit.
    pub quantity_millis: i64,
    /// `unit_price × quantity`, in cents.
    pub subtotal_cents: i64,
    /// Purchase price per unit at placement time (0 when unrecorded).
    pub unit_purchase_price_cents: i64,
    /// `unit_price − unit_purchase_price`.
    pub unit_profit_cents: i64,
    /// Line profit: `subtotal − purchase cost`, in cents.
    pub total_profit_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    #[inline]
    pub fn quantity(&self) -> Quantity {
        Quantity::from_millis(self.quantity_millis)
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Requests / Read Models
// =============================================================================

/// One requested line in a [`PlaceOrderRequest`].
///
/// Duplicate `product_id` entries are allowed: each line is priced and
/// stocked independently, in list order, against the same stock counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    /// Requested quantity in thousandths of a unit (must be > 0).
    pub quantity_millis: i64,
}

impl OrderItemRequest {
    #[inline]
    pub fn quantity(&self) -> Quantity {
        Quantity::from_millis(self.quantity_millis)
    }
}

/// Input contract of the order-placement transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub client_id: String,
    pub items: Vec<OrderItemRequest>,
    /// Optional discount in cents (≥ 0, defaults to 0).
    pub discount_cents: Option<i64>,
    /// Optional tax in cents (≥ 0, defaults to 0).
    pub tax_cents: Option<i64>,
    pub notes: Option<String>,
}

/// An order together with its line items, as returned by the read side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================
