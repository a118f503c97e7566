//! # Domain Types
//!
//! Core domain types used throughout Tienda.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  id (u64)       │   │  id (u64)       │       │
//! │  │  name           │   │  name           │   │  user_id        │       │
//! │  │  price_cents    │   │  email (unique) │   │  lines (frozen) │       │
//! │  │  stock (>= 0)   │   │                 │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  SalesSummary   │   │  ProductSales   │   │   StockLevel    │       │
//! │  │  revenue, count │   │  units, revenue │   │  product, stock │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every table hands out `u64` identifiers from its own counter, starting at
//! 1 and never reused after deletion.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Identifier of a [`Product`].
pub type ProductId = u64;

/// Identifier of a [`User`].
pub type UserId = u64;

/// Identifier of an [`Order`].
pub type OrderId = u64;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier, immutable.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units on hand. Never negative.
    pub stock: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` units can be taken from stock.
    #[inline]
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Partial update of a product's descriptive fields.
///
/// Stock is deliberately absent: it only moves through restock and checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i64>,
}

impl ProductUpdate {
    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price_cents.is_none()
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered customer. The credential never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Registration input.
#[derive(Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub credential: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("credential", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Order
// =============================================================================

/// A line of a placed order.
/// Uses snapshot pattern to freeze product data at time of checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    pub product_id: ProductId,
    /// Product name at time of checkout (frozen).
    pub name_snapshot: String,
    pub quantity: i64,
    /// Unit price in cents at time of checkout (frozen).
    pub unit_price_cents: i64,
    /// unit_price × quantity.
    pub line_total_cents: i64,
}

impl OrderLine {
    /// Freezes the product's current name and price for `quantity` units.
    pub fn snapshot(product: &Product, quantity: i64) -> Self {
        OrderLine {
            product_id: product.id,
            name_snapshot: product.name.clone(),
            quantity,
            unit_price_cents: product.price_cents,
            line_total_cents: product.price().multiply_quantity(quantity).cents(),
        }
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// An immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds an order, computing the total from the line snapshots.
    pub fn new(
        id: OrderId,
        user_id: UserId,
        lines: Vec<OrderLine>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total: Money = lines.iter().map(OrderLine::line_total).sum();
        Order {
            id,
            user_id,
            lines,
            total_cents: total.cents(),
            created_at,
        }
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Reports
// =============================================================================

/// Units sold and revenue for one product, from order snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSales {
    pub product_id: ProductId,
    pub units_sold: i64,
    pub revenue_cents: i64,
}

/// Aggregate over every placed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesSummary {
    pub total_revenue_cents: i64,
    pub total_orders: u64,
    /// Sorted by units sold (desc), ties by lowest product id.
    pub top_products: Vec<ProductSales>,
}

/// Point-in-time stock of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockLevel {
    pub product_id: ProductId,
    pub name: String,
    pub stock: i64,
}

impl From<&Product> for StockLevel {
    fn from(product: &Product) -> Self {
        StockLevel {
            product_id: product.id,
            name: product.name.clone(),
            stock: product.stock,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: 7,
            name: "Widget".to_string(),
            price_cents: 1000,
            stock: 5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_line_snapshot() {
        let line = OrderLine::snapshot(&widget(), 3);
        assert_eq!(line.product_id, 7);
        assert_eq!(line.name_snapshot, "Widget");
        assert_eq!(line.unit_price_cents, 1000);
        assert_eq!(line.line_total().cents(), 3000);
    }

    #[test]
    fn test_order_total_is_sum_of_lines() {
        let mut gadget = widget();
        gadget.id = 8;
        gadget.price_cents = 250;

        let lines = vec![
            OrderLine::snapshot(&widget(), 3),
            OrderLine::snapshot(&gadget, 2),
        ];
        let order = Order::new(1, 42, lines, Utc::now());

        assert_eq!(order.total().cents(), 3500);
        assert_eq!(order.total_quantity(), 5);
    }

    #[test]
    fn test_has_stock_for() {
        let product = widget();
        assert!(product.has_stock_for(5));
        assert!(!product.has_stock_for(6));
    }

    #[test]
    fn test_product_update_is_empty() {
        assert!(ProductUpdate::default().is_empty());
        let update = ProductUpdate {
            price_cents: Some(1),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_new_user_debug_redacts_credential() {
        let input = NewUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            credential: "hunter2hunter2".to_string(),
        };
        let debug = format!("{input:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(widget()).unwrap();
        assert_eq!(json["priceCents"], 1000);
        assert!(json.get("price_cents").is_none());
    }
}
