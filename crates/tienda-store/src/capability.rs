//! # Capability Traits
//!
//! Narrow views of the store. A caller asks for the one capability it needs
//! and receives an `Arc<dyn Trait>`; [`MemoryStore`](crate::MemoryStore) is
//! the only implementation.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  Handler group        Capabilities                                      │
//! │  ─────────────        ────────────                                      │
//! │  products             ProductReader + ProductWriter + StockMutator      │
//! │  users                UserDirectory + OrderReader                       │
//! │  cart                 CartMutator + OrderWriter                         │
//! │  orders               OrderReader                                       │
//! │  reports              ReportReader                                      │
//! │                                                                          │
//! │                 all backed by one Arc<MemoryStore>                       │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use tienda_core::{
    Cart, NewProduct, NewUser, Order, OrderId, Product, ProductId, ProductUpdate, SalesSummary,
    StockLevel, User, UserId,
};

use crate::error::StoreResult;

/// Read access to the catalog.
#[async_trait]
pub trait ProductReader: Send + Sync {
    async fn get_product(&self, id: ProductId) -> StoreResult<Product>;

    /// All products, ordered by id.
    async fn list_products(&self) -> Vec<Product>;

    /// Units on hand for one product.
    async fn stock_level(&self, id: ProductId) -> StoreResult<i64>;
}

/// Catalog maintenance.
#[async_trait]
pub trait ProductWriter: Send + Sync {
    async fn create_product(&self, input: NewProduct) -> StoreResult<Product>;

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> StoreResult<Product>;

    /// Fails with `Conflict` while any cart still holds a line for the product.
    async fn delete_product(&self, id: ProductId) -> StoreResult<()>;
}

/// Stock adjustments outside of checkout.
#[async_trait]
pub trait StockMutator: Send + Sync {
    /// Adds `quantity` (> 0) units and returns the updated product.
    async fn restock(&self, id: ProductId, quantity: i64) -> StoreResult<Product>;
}

/// Registration and credential checks.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn create_user(&self, input: NewUser) -> StoreResult<User>;

    async fn get_user(&self, id: UserId) -> StoreResult<User>;

    /// `Unauthorized` for an unknown email and for a wrong credential alike.
    async fn authenticate(&self, email: &str, credential: &str) -> StoreResult<User>;
}

/// Per-user cart edits.
#[async_trait]
pub trait CartMutator: Send + Sync {
    async fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> StoreResult<Cart>;

    async fn remove_from_cart(&self, user_id: UserId, product_id: ProductId) -> StoreResult<Cart>;

    /// Zero removes the line.
    async fn update_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> StoreResult<Cart>;

    async fn get_cart(&self, user_id: UserId) -> StoreResult<Cart>;
}

/// Turns a cart into an order.
#[async_trait]
pub trait OrderWriter: Send + Sync {
    async fn checkout(&self, user_id: UserId) -> StoreResult<Order>;
}

/// Placed orders.
#[async_trait]
pub trait OrderReader: Send + Sync {
    async fn get_order(&self, id: OrderId) -> StoreResult<Order>;

    /// Orders of one user, ordered by id.
    async fn orders_for_user(&self, user_id: UserId) -> StoreResult<Vec<Order>>;
}

/// Aggregate views.
#[async_trait]
pub trait ReportReader: Send + Sync {
    async fn sales_summary(&self) -> SalesSummary;

    /// Stock of every product, ordered by id.
    async fn inventory_snapshot(&self) -> Vec<StockLevel>;

    /// Products with `stock <= threshold`, ordered by id.
    async fn low_stock(&self, threshold: i64) -> StoreResult<Vec<StockLevel>>;
}
