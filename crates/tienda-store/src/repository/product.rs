//! # Product Repository
//!
//! Catalog and stock operations on [`MemoryStore`].
//!
//! ## Stock Movement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Who Changes Product.stock                            │
//! │                                                                         │
//! │  create_product ──► initial stock (>= 0)                               │
//! │  restock        ──► stock + quantity                                   │
//! │  checkout       ──► stock - quantity     (order.rs, all-or-nothing)    │
//! │                                                                         │
//! │  update_product never touches stock.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use tienda_core::validation::{
    validate_price_cents, validate_product_name, validate_restock_quantity, validate_stock,
};
use tienda_core::{NewProduct, Product, ProductId, ProductUpdate};

use crate::capability::{ProductReader, ProductWriter, StockMutator};
use crate::error::{StoreError, StoreResult};
use crate::store::MemoryStore;

#[async_trait]
impl ProductReader for MemoryStore {
    async fn get_product(&self, id: ProductId) -> StoreResult<Product> {
        self.products
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    async fn list_products(&self) -> Vec<Product> {
        self.products.read().await.values().cloned().collect()
    }

    async fn stock_level(&self, id: ProductId) -> StoreResult<i64> {
        self.products
            .read()
            .await
            .get(id)
            .map(|p| p.stock)
            .ok_or_else(|| StoreError::not_found("Product", id))
    }
}

#[async_trait]
impl ProductWriter for MemoryStore {
    async fn create_product(&self, input: NewProduct) -> StoreResult<Product> {
        validate_product_name(&input.name)?;
        validate_price_cents(input.price_cents)?;
        validate_stock(input.stock)?;

        let now = Utc::now();
        let mut products = self.products.write().await;
        let product = products
            .insert_with(|id| Product {
                id,
                name: input.name.trim().to_string(),
                price_cents: input.price_cents,
                stock: input.stock,
                created_at: now,
                updated_at: now,
            })
            .clone();

        debug!(id = product.id, name = %product.name, "Created product");
        Ok(product)
    }

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> StoreResult<Product> {
        if let Some(name) = &update.name {
            validate_product_name(name)?;
        }
        if let Some(price_cents) = update.price_cents {
            validate_price_cents(price_cents)?;
        }

        let mut products = self.products.write().await;
        let product = products
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        if update.is_empty() {
            return Ok(product.clone());
        }

        if let Some(name) = update.name {
            product.name = name.trim().to_string();
        }
        if let Some(price_cents) = update.price_cents {
            product.price_cents = price_cents;
        }
        product.updated_at = Utc::now();

        debug!(id = id, "Updated product");
        Ok(product.clone())
    }

    /// Hard delete.
    ///
    /// The products write lock is held across the cart scan, and
    /// `add_to_cart` holds the products read lock while it inserts, so no
    /// cart can gain a line for this product between the scan and removal.
    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let mut products = self.products.write().await;
        if !products.contains(id) {
            return Err(StoreError::not_found("Product", id));
        }

        for slot in self.all_cart_slots().await {
            let cart = slot.lock().await;
            if cart.contains(id) {
                return Err(StoreError::conflict(format!(
                    "product {} is in the cart of user {}",
                    id, cart.user_id
                )));
            }
        }

        products.remove(id);
        debug!(id = id, "Deleted product");
        Ok(())
    }
}

#[async_trait]
impl StockMutator for MemoryStore {
    async fn restock(&self, id: ProductId, quantity: i64) -> StoreResult<Product> {
        validate_restock_quantity(quantity)?;

        let mut products = self.products.write().await;
        let product = products
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        let new_stock = product.stock + quantity;
        validate_stock(new_stock)?;

        product.stock = new_stock;
        product.updated_at = Utc::now();

        debug!(id = id, quantity = quantity, stock = new_stock, "Restocked product");
        Ok(product.clone())
    }
}
