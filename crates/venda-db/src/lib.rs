//! # venda-db: SQLite Storage for Venda
//!
//! Persistence layer: connection pool, embedded migrations, repositories,
//! and the order-placement transaction.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        venda-db                                 │
//! │                                                                 │
//! │  ┌──────────┐   ┌─────────────────────────────────────────┐    │
//! │  │ Database │──▶│ repositories                            │    │
//! │  │  (pool)  │   │  clients / products / orders            │    │
//! │  └──────────┘   │                                         │    │
//! │       │         │  orders::place_order is the one unit    │    │
//! │       ▼         │  that composes: stock reservation +     │    │
//! │  ┌──────────┐   │  pricing (venda-core) + persistence,    │    │
//! │  │migrations│   │  all inside a single transaction        │    │
//! │  └──────────┘   └─────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use venda_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./venda.db")).await?;
//! let order = db.orders().place_order(&request).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult, OrderError, OrderResult};
pub use pool::{Database, DbConfig};
pub use repository::{ClientRepository, OrderRepository, ProductRepository};
