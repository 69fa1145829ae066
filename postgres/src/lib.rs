//! `PostgreSQL` shipment store implementation for Storefront.
//!
//! This crate provides a production-ready PostgreSQL-backed implementation
//! of the `ShipmentStore` trait from `storefront-core`. It uses sqlx with
//! plain parameterized queries and supports:
//!
//! - Create-or-replace persistence keyed by shipment id
//! - Status updates with absence detection
//! - Connection pooling
//!
//! The persisted row shape mirrors the shipment wire form: product ids are
//! stored as a single comma-delimited TEXT column, timestamps as
//! TIMESTAMPTZ.
//!
//! # Example
//!
//! ```ignore
//! use storefront_postgres::PostgresShipmentStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresShipmentStore::new("postgres://localhost/storefront").await?;
//!     store.ensure_schema().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod shipment_store;

pub use shipment_store::PostgresShipmentStore;
