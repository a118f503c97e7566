//! # tienda-core: Pure Domain Logic for Tienda
//!
//! This crate holds every domain type shared by the store and the HTTP API,
//! plus the pure validation rules. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tienda Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/api (axum + CORS)                          │   │
//! │  │   /products  /users  /cart  /orders  /reports                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ capability traits                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              tienda-store (MemoryStore)                         │   │
//! │  │   tables, lock ordering, checkout, reports                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ tienda-core (THIS CRATE) ★                       │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│   │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │   │   │
//! │  │   │  Order    │  │           │  │ CartItem  │  │           │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Product, User, Order) and report rows
//! - [`cart`] - Cart and CartItem with line-merging rules
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error type
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::money::Money;
//!
//! let price = Money::from_cents(1000); // $10.00
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.cents(), 3000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct line items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in a cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
