//! # Storefront Core
//!
//! Core domain types and coordination logic for a minimal e-commerce
//! checkout flow: a product catalog with stock, a shopping cart that
//! converts provisional reservations into authoritative stock decrements,
//! and a shipping coordinator that tracks a shipment's delivery through a
//! small state machine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────┐     commit      ┌──────────┐    purchase     ┌───────────┐
//! │  Order  │ ──────────────► │   Cart   │ ──────────────► │  Product  │
//! └────┬────┘                 └──────────┘  (atomic CAS)   └───────────┘
//!      │ create
//!      ▼
//! ┌──────────────────┐   put / update_status   ┌───────────────┐
//! │ ShippingService  │ ───────────────────────►│ ShipmentStore │
//! │  (state machine) │                         └───────────────┘
//! └────────┬─────────┘        publish          ┌──────────────────┐
//!          └─────────────────────────────────► │ ShippingNotifier │
//!                                              └──────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! - **Injected collaborators**: persistence ([`store::ShipmentStore`]),
//!   queuing ([`notifier::ShippingNotifier`]) and time
//!   ([`environment::Clock`]) are traits supplied through
//!   [`shipping::ShippingEnvironment`] — production and in-memory
//!   implementations are interchangeable.
//! - **No hidden retries**: infrastructure failures propagate to the
//!   caller unchanged; retry and timeout policy belong to the layers that
//!   own the collaborators.
//! - **Explicit hazards**: the two partial-failure windows of the source
//!   design (cart commit without rollback, shipment creation without
//!   compensation) are kept and documented rather than silently repaired.
//!
//! ## Shipment Lifecycle
//!
//! ```text
//! CREATED ──► IN_PROGRESS ──► COMPLETED   (arrived by due date)
//!                        └──► FAILED      (past due date)
//! ```
//!
//! `CREATED` and `IN_PROGRESS` collapse on the happy path: creation
//! persists the record as `CREATED`, announces it, and immediately marks
//! it `IN_PROGRESS`. The terminal transition happens on a later,
//! externally triggered [`shipping::ShippingService::process`] call.

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

pub mod cart;
pub mod catalog;
pub mod environment;
pub mod money;
pub mod notifier;
pub mod order;
pub mod shipment;
pub mod shipping;
pub mod store;

pub use cart::Cart;
pub use catalog::{Catalog, InventoryError, Product, Sku};
pub use environment::{Clock, SystemClock};
pub use money::Money;
pub use notifier::{NotifierError, ShippingNotifier};
pub use order::{Order, OrderConfig, OrderError, OrderId};
pub use shipment::{ShipmentId, ShipmentRecord, ShippingStatus, ShippingType};
pub use shipping::{Shipment, ShippingEnvironment, ShippingError, ShippingService};
pub use store::{ShipmentStore, ShipmentStoreError};
