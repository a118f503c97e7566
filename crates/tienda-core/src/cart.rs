//! # Cart
//!
//! A user's shopping cart: one line per product, quantities accumulate.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Line Operations                                 │
//! │                                                                         │
//! │  add_item(p, 2) ──────► [p×2]                                           │
//! │  add_item(p, 3) ──────► [p×5]          (merged, never duplicated)       │
//! │  update_quantity(p, 1) ► [p×1]                                          │
//! │  update_quantity(p, 0) ► []            (zero removes the line)          │
//! │  remove_item(p) ──────► []                                              │
//! │  clear() ─────────────► []             (after checkout)                 │
//! │                                                                         │
//! │  NOTE: No stock is checked here. Carts may ask for more than is on     │
//! │        hand; the shortfall surfaces at checkout.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{ProductId, UserId};
use crate::validation::{validate_cart_size, validate_quantity, ValidationResult};
use crate::MAX_ITEM_QUANTITY;

/// A line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    pub product_id: ProductId,
    /// Always > 0 while the line exists.
    pub quantity: i64,
}

/// The shopping cart of one user.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding same product increases quantity)
/// - Quantity is in `1..=MAX_ITEM_QUANTITY`; setting 0 removes the line
/// - At most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    pub user_id: UserId,
    /// Lines in insertion order.
    pub items: Vec<CartItem>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart for `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Cart {
            user_id,
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Adds `quantity` of a product, merging with an existing line.
    pub fn add_item(&mut self, product_id: ProductId, quantity: i64) -> ValidationResult<()> {
        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
        } else {
            validate_cart_size(self.items.len())?;
            self.items.push(CartItem {
                product_id,
                quantity,
            });
        }

        self.touch();
        Ok(())
    }

    /// Sets the quantity of an existing line. Zero removes it.
    ///
    /// ## Returns
    /// * `Ok(true)` - line updated or removed
    /// * `Ok(false)` - no line for this product
    /// * `Err(_)` - negative or too large quantity
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> ValidationResult<bool> {
        if quantity == 0 {
            return Ok(self.remove_item(product_id));
        }
        validate_quantity(quantity)?;

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                self.touch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the line for a product. Returns false if there was none.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        let removed = self.items.len() != initial_len;
        if removed {
            self.touch();
        }
        removed
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Quantity currently requested for a product.
    pub fn quantity_of(&self, product_id: ProductId) -> Option<i64> {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map(|i| i.quantity)
    }

    /// Checks whether any line references `product_id`.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.quantity_of(product_id).is_some()
    }

    /// Returns the number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
