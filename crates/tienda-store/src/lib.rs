//! # tienda-store: In-Memory Store for Tienda
//!
//! This crate owns the shared data layer: entity tables, per-user carts,
//! atomic checkout and the sales/inventory reports.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tienda Data Flow                                 │
//! │                                                                         │
//! │  HTTP handler (POST /cart/{user_id}/checkout)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  tienda-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  MemoryStore  │    │  Repositories │    │ Capabilities │  │   │
//! │  │   │  (store.rs)   │    │ (product.rs)  │    │ (traits)     │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ RwLock tables │◄───│ cart.rs       │───►│ CartMutator  │  │   │
//! │  │   │ Lock order    │    │ order.rs      │    │ OrderWriter  │  │   │
//! │  │   │ Cart mutexes  │    │ report.rs     │    │ ...          │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Nothing is persisted: a restart starts from an empty store.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `MemoryStore`, `StoreConfig`, lock order
//! - [`capability`] - Narrow async traits handed to callers
//! - [`repository`] - Trait implementations (product, user, cart, order, report)
//! - [`table`] - Id-assigning entity table
//! - [`credential`] - Argon2id credential hashing
//! - [`seed`] - Demo catalog
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tienda_store::prelude::*;
//!
//! let store = Arc::new(MemoryStore::new());
//!
//! let widget = store.create_product(NewProduct { name: "Widget".into(), price_cents: 1000, stock: 5 }).await?;
//! store.add_to_cart(user.id, widget.id, 3).await?;
//! let order = store.checkout(user.id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod capability;
pub mod credential;
pub mod error;
pub mod repository;
pub mod seed;
pub mod store;
pub mod table;

// =============================================================================
// Re-exports
// =============================================================================

pub use capability::{
    CartMutator, OrderReader, OrderWriter, ProductReader, ProductWriter, ReportReader,
    StockMutator, UserDirectory,
};
pub use credential::HashingCost;
pub use error::{StoreError, StoreResult};
pub use store::{MemoryStore, StoreConfig};

/// Everything needed to drive the store through its capabilities.
pub mod prelude {
    pub use crate::capability::*;
    pub use crate::error::{StoreError, StoreResult};
    pub use crate::store::{MemoryStore, StoreConfig};
    pub use tienda_core::{NewProduct, NewUser, ProductUpdate};
}
