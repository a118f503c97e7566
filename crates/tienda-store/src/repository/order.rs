//! # Order Repository
//!
//! Checkout and order lookups.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         checkout(user_id)                               │
//! │                                                                         │
//! │  1. users(r)         user exists?                 ── NotFound           │
//! │  2. products(w)      ─┐                                                 │
//! │  3. cart mutex        │ held together             ── EmptyCart          │
//! │  4. validate lines    │ product exists,           ── NotFound           │
//! │                       │ stock >= quantity         ── InsufficientStock  │
//! │  5. orders(w)         │                                                 │
//! │  6. commit           ─┘ stock -= qty, insert order, clear cart          │
//! │                                                                         │
//! │  Any error before step 6 leaves every table untouched.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two checkouts touching the same product serialize on the products write
//! lock, so stock can never be sold twice.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use tienda_core::{Order, OrderId, OrderLine, ProductId, UserId};

use crate::capability::{OrderReader, OrderWriter};
use crate::error::{StoreError, StoreResult};
use crate::store::MemoryStore;

#[async_trait]
impl OrderWriter for MemoryStore {
    async fn checkout(&self, user_id: UserId) -> StoreResult<Order> {
        self.require_user(user_id).await?;

        let mut products = self.products.write().await;

        let slot = self
            .cart_slot(user_id)
            .await
            .ok_or(StoreError::EmptyCart { user_id })?;
        let mut cart = slot.lock().await;
        if cart.is_empty() {
            return Err(StoreError::EmptyCart { user_id });
        }

        // Validate every line before touching anything. Cart lines hold
        // distinct products, so each line gets its own row handle.
        let ids: Vec<ProductId> = cart.items.iter().map(|item| item.product_id).collect();
        let rows = products.get_disjoint_mut(&ids);

        let mut lines = Vec::with_capacity(ids.len());
        let mut staged = Vec::with_capacity(ids.len());
        for (item, row) in cart.items.iter().zip(rows) {
            let product =
                row.ok_or_else(|| StoreError::not_found("Product", item.product_id))?;

            if !product.has_stock_for(item.quantity) {
                return Err(StoreError::InsufficientStock {
                    product_id: item.product_id,
                    available: product.stock,
                    requested: item.quantity,
                });
            }

            lines.push(OrderLine::snapshot(product, item.quantity));
            staged.push(product);
        }

        let mut orders = self.orders.write().await;

        // Commit
        let now = Utc::now();
        for (product, line) in staged.into_iter().zip(&lines) {
            product.stock -= line.quantity;
            product.updated_at = now;
        }

        let order = orders
            .insert_with(|id| Order::new(id, user_id, lines, now))
            .clone();
        cart.clear();

        info!(
            order_id = order.id,
            user_id = user_id,
            lines = order.lines.len(),
            total_cents = order.total_cents,
            "Checkout committed"
        );
        Ok(order)
    }
}

#[async_trait]
impl OrderReader for MemoryStore {
    async fn get_order(&self, id: OrderId) -> StoreResult<Order> {
        self.orders
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Order", id))
    }

    async fn orders_for_user(&self, user_id: UserId) -> StoreResult<Vec<Order>> {
        self.require_user(user_id).await?;

        let orders: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect();

        debug!(user_id = user_id, count = orders.len(), "Listed orders for user");
        Ok(orders)
    }
}
