//! # Demo Catalog Seeding
//!
//! Populates an empty store with a small fixed catalog for development.
//!
//! ## Usage
//! ```bash
//! # Start the API with demo products
//! TIENDA_SEED_DEMO=true cargo run -p tienda-api
//! ```
//!
//! ## Generated Products
//! Each category contributes a handful of items with:
//! - Name: `{item} {size}`
//! - Price: category base + size add-on
//! - Stock: 0 - 40, deterministic per item (some start at zero so the
//!   low-stock report has something to show)

use tracing::info;

use tienda_core::NewProduct;

use crate::capability::{ProductReader, ProductWriter};
use crate::error::StoreResult;
use crate::store::MemoryStore;

/// Categories with their items and base price in cents.
const CATEGORIES: &[(&str, i64, &[&str])] = &[
    ("Beverages", 199, &["Cola", "Lemonade", "Iced Tea", "Orange Juice"]),
    ("Snacks", 149, &["Potato Chips", "Pretzels", "Trail Mix"]),
    ("Bakery", 299, &["Sourdough Loaf", "Croissant", "Bagel"]),
    ("Pantry", 399, &["Olive Oil", "Pasta", "Rice", "Coffee Beans"]),
];

/// Size variants with price add-on in cents.
const SIZES: &[(&str, i64)] = &[("Small", 0), ("Large", 150)];

/// Inserts the demo catalog unless the store already has products.
///
/// ## Returns
/// Number of products created (0 when skipped).
pub async fn seed_demo_catalog(store: &MemoryStore) -> StoreResult<usize> {
    let existing = store.list_products().await.len();
    if existing > 0 {
        info!(existing, "Catalog not empty, skipping demo seed");
        return Ok(0);
    }

    let mut generated = 0;
    for (category_idx, (category, base_price, items)) in CATEGORIES.iter().enumerate() {
        for (item_idx, item) in items.iter().enumerate() {
            for (size_idx, (size, price_addon)) in SIZES.iter().enumerate() {
                let seed = category_idx * 100 + item_idx * 10 + size_idx;
                store
                    .create_product(demo_product(item, size, base_price + price_addon, seed))
                    .await?;
                generated += 1;
            }
        }
        info!(category = %category, "Seeded category");
    }

    info!(count = generated, "Demo catalog seeded");
    Ok(generated)
}

fn demo_product(item: &str, size: &str, price_cents: i64, seed: usize) -> NewProduct {
    NewProduct {
        name: format!("{} {}", item, size),
        price_cents,
        stock: ((seed * 7) % 41) as i64,
    }
}
