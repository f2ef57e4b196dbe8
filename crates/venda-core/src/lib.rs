//! # venda-core: Pure Business Logic for Venda
//!
//! This crate is the **heart** of Venda. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Venda Architecture                          │
//! │                                                                 │
//! │  Request handlers (out of scope for this workspace)             │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │              ★ venda-core (THIS CRATE) ★                  │  │
//! │  │                                                           │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌────────────┐      │  │
//! │  │  │  types  │ │  money  │ │ pricing │ │ validation │      │  │
//! │  │  │ Product │ │  Money  │ │  item + │ │   rules    │      │  │
//! │  │  │  Order  │ │Quantity │ │  totals │ │   checks   │      │  │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └────────────┘      │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  venda-db: SQLite storage, repositories, the order transaction  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Client, Product, Order, OrderItem, requests)
//! - [`money`] - Money (cents) and Quantity (thousandths) arithmetic
//! - [`pricing`] - Per-item and aggregate pricing calculator
//! - [`error`] - Domain error types
//! - [`validation`] - Request-shape validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, no side effects
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Scaled-Integer Decimals**: money in cents (2 dp), quantities in
//!    thousandths (3 dp); binary floating point never carries a value
//! 4. **Explicit Errors**: typed errors, never strings or panics

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// Re-exports for convenience: `use venda_core::Money` instead of
// `use venda_core::money::Money`.
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Quantity};
pub use pricing::{price_item, total_order, ItemPricing, OrderTotals};
pub use types::*;
