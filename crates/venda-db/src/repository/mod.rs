//! # Repository Modules
//!
//! Database access repositories, one per aggregate.
//!
//! Repositories own the SQL. Everything above them works with
//! `venda-core` types; everything below is the pool. The one cross-cutting
//! primitive is [`product::ProductRepository::reserve_stock`], which the
//! order repository calls inside its placement transaction.

pub mod client;
pub mod order;
pub mod product;

pub use client::{generate_client_id, ClientRepository};
pub use order::OrderRepository;
pub use product::{generate_product_id, ProductRepository};
