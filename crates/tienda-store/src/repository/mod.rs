//! # Repository Module
//!
//! Capability implementations for [`MemoryStore`](crate::MemoryStore), one
//! file per entity.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Capabilities → Tables                                │
//! │                                                                         │
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  carts.add_to_cart(user_id, product_id, 2)                      │
//! │       ▼                                                                 │
//! │  Arc<dyn CartMutator>                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  impl CartMutator for MemoryStore   (cart.rs)                           │
//! │       │                                                                 │
//! │       │  lock order: users → products → carts → orders                  │
//! │       ▼                                                                 │
//! │  Table<Product> / Cart / Table<Order>                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Files
//!
//! - `product` - ProductReader, ProductWriter, StockMutator
//! - `user` - UserDirectory
//! - `cart` - CartMutator
//! - `order` - OrderWriter (checkout), OrderReader
//! - `report` - ReportReader and the pure [`report::summarize`]

pub mod cart;
pub mod order;
pub mod product;
pub mod report;
pub mod user;
