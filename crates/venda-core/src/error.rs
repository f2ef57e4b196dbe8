//! # Error Types
//!
//! Domain-specific error types for venda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Error Types                              │
//! │                                                                 │
//! │  venda-core errors (this file)                                  │
//! │  ├── CoreError        - Domain failures (4xx-class)             │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  venda-db errors (separate crate)                               │
//! │  ├── DbError          - Storage failures (5xx-class)            │
//! │  └── OrderError       - CoreError ∪ DbError, what callers see   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, never manual impls
//! 2. Context in messages (entity names, ids, amounts)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Quantity;

// =============================================================================
// Core Error
// =============================================================================

/// Domain failures. All of these are caller-correctable (4xx-class): the
/// request referenced something that does not exist or asked for more stock
/// than is available.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Client referenced by an order does not exist.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Product referenced by an order line does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Stock check failed during placement.
    ///
    /// Carries the product *name* (not just the id) so an operator can act
    /// on the message directly, plus the available/requested amounts.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: Quantity,
        requested: Quantity,
    },

    /// Request shape was invalid; rejected before any transaction opened.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A list that must have entries is empty.
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. malformed id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Purchase price must stay strictly below the sale price.
    #[error("purchase price {purchase_cents} must be below sale price {price_cents}")]
    PurchaseAboveSale { purchase_cents: i64, price_cents: i64 },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
