//! # Cart Repository
//!
//! Per-user cart edits. Carts are optimistic: adding a line never checks
//! stock, the shortfall surfaces at checkout.
//!
//! ## Locks Taken
//! ```text
//! add_to_cart       users(r) ─► products(r) ─► carts index ─► cart mutex
//! remove/update     users(r) ─────────────────► carts index ─► cart mutex
//! get_cart          users(r) ─────────────────► carts index ─► cart mutex
//! ```

use async_trait::async_trait;
use tracing::debug;

use tienda_core::validation::validate_quantity;
use tienda_core::{Cart, ProductId, UserId};

use crate::capability::CartMutator;
use crate::error::{StoreError, StoreResult};
use crate::store::MemoryStore;

fn missing_line(product_id: ProductId) -> StoreError {
    StoreError::not_found("Cart item", product_id)
}

#[async_trait]
impl CartMutator for MemoryStore {
    async fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> StoreResult<Cart> {
        validate_quantity(quantity)?;
        self.require_user(user_id).await?;

        // Held until the line is in place so delete_product cannot slip in.
        let products = self.products.read().await;
        if !products.contains(product_id) {
            return Err(StoreError::not_found("Product", product_id));
        }

        let slot = self.cart_slot_or_create(user_id).await;
        let mut cart = slot.lock().await;
        cart.add_item(product_id, quantity)?;
        drop(products);

        debug!(
            user_id = user_id,
            product_id = product_id,
            quantity = cart.quantity_of(product_id).unwrap_or(quantity),
            "Added to cart"
        );
        Ok(cart.clone())
    }

    async fn remove_from_cart(&self, user_id: UserId, product_id: ProductId) -> StoreResult<Cart> {
        self.require_user(user_id).await?;

        let slot = self
            .cart_slot(user_id)
            .await
            .ok_or_else(|| missing_line(product_id))?;
        let mut cart = slot.lock().await;

        if !cart.remove_item(product_id) {
            return Err(missing_line(product_id));
        }

        debug!(user_id = user_id, product_id = product_id, "Removed from cart");
        Ok(cart.clone())
    }

    async fn update_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> StoreResult<Cart> {
        if quantity != 0 {
            validate_quantity(quantity)?;
        }
        self.require_user(user_id).await?;

        let slot = self
            .cart_slot(user_id)
            .await
            .ok_or_else(|| missing_line(product_id))?;
        let mut cart = slot.lock().await;

        if !cart.update_quantity(product_id, quantity)? {
            return Err(missing_line(product_id));
        }

        debug!(
            user_id = user_id,
            product_id = product_id,
            quantity = quantity,
            "Updated cart quantity"
        );
        Ok(cart.clone())
    }

    async fn get_cart(&self, user_id: UserId) -> StoreResult<Cart> {
        self.require_user(user_id).await?;

        match self.cart_slot(user_id).await {
            Some(slot) => Ok(slot.lock().await.clone()),
            None => Ok(Cart::new(user_id)),
        }
    }
}
