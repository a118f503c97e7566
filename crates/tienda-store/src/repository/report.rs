//! # Report Repository
//!
//! Sales and inventory aggregates. Sales figures come only from order line
//! snapshots, so later price edits or product deletion never change them.

use std::collections::BTreeMap;

use async_trait::async_trait;

use tienda_core::validation::validate_threshold;
use tienda_core::{Money, Order, ProductId, ProductSales, SalesSummary, StockLevel};

use crate::capability::ReportReader;
use crate::error::StoreResult;
use crate::store::MemoryStore;

/// Aggregates a set of orders.
///
/// `top_products` is sorted by units sold (desc), ties broken by the lowest
/// product id. Revenue and unit counts clamp at `i64::MAX` rather than
/// overflow; below that they equal the exact sums over the orders.
pub fn summarize<'a, I>(orders: I) -> SalesSummary
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut revenue = Money::default();
    let mut total_orders: u64 = 0;
    let mut per_product: BTreeMap<ProductId, (i64, Money)> = BTreeMap::new();

    for order in orders {
        revenue = revenue.saturating_add(order.total());
        total_orders += 1;

        for line in &order.lines {
            let (units, line_revenue) = per_product.entry(line.product_id).or_default();
            *units = units.saturating_add(line.quantity);
            *line_revenue = line_revenue.saturating_add(line.line_total());
        }
    }

    let mut top: Vec<ProductSales> = per_product
        .into_iter()
        .map(|(product_id, (units_sold, revenue))| ProductSales {
            product_id,
            units_sold,
            revenue_cents: revenue.cents(),
        })
        .collect();
    top.sort_by(|a, b| {
        b.units_sold
            .cmp(&a.units_sold)
            .then(a.product_id.cmp(&b.product_id))
    });

    SalesSummary {
        total_revenue_cents: revenue.cents(),
        total_orders,
        top_products: top,
    }
}

#[async_trait]
impl ReportReader for MemoryStore {
    async fn sales_summary(&self) -> SalesSummary {
        summarize(self.orders.read().await.values())
    }

    async fn inventory_snapshot(&self) -> Vec<StockLevel> {
        self.products
            .read()
            .await
            .values()
            .map(StockLevel::from)
            .collect()
    }

    async fn low_stock(&self, threshold: i64) -> StoreResult<Vec<StockLevel>> {
        validate_threshold(threshold)?;

        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|p| p.stock <= threshold)
            .map(StockLevel::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tienda_core::{NewProduct, OrderLine, Product};

    use crate::capability::ProductWriter;
    use crate::error::StoreError;
    use crate::store::StoreConfig;

    fn product(id: ProductId, price_cents: i64) -> Product {
        Product {
            id,
            name: format!("P{id}"),
            price_cents,
            stock: 100,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn order(id: u64, lines: &[(ProductId, i64, i64)]) -> Order {
        let lines = lines
            .iter()
            .map(|&(pid, price, qty)| OrderLine::snapshot(&product(pid, price), qty))
            .collect();
        Order::new(id, 1, lines, Utc::now())
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&Vec::<Order>::new());
        assert_eq!(summary, SalesSummary::default());
    }

    #[test]
    fn test_summarize_totals_and_ranking() {
        let orders = vec![
            order(1, &[(3, 100, 2), (1, 500, 1)]),
            order(2, &[(2, 200, 2), (1, 500, 1)]),
        ];

        let summary = summarize(&orders);

        assert_eq!(summary.total_orders, 2);
        assert_eq!(
            summary.total_revenue_cents,
            orders.iter().map(|o| o.total_cents).sum::<i64>()
        );

        // All three products sold 2 units: ties go to the lowest id.
        let ranking: Vec<_> = summary.top_products.iter().map(|p| p.product_id).collect();
        assert_eq!(ranking, vec![1, 2, 3]);
        assert_eq!(summary.top_products[0].revenue_cents, 1000);
    }

    #[test]
    fn test_summarize_units_desc() {
        let orders = vec![order(1, &[(1, 100, 1), (2, 100, 4)])];
        let summary = summarize(&orders);
        assert_eq!(summary.top_products[0].product_id, 2);
        assert_eq!(summary.top_products[0].units_sold, 4);
    }

    #[test]
    fn test_summarize_clamps_instead_of_overflowing() {
        use tienda_core::validation::MAX_PRICE_CENTS;
        use tienda_core::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

        // A full cart at the price and quantity limits: valid, but a few
        // thousand of these exceed i64 when summed.
        let full_cart: Vec<(ProductId, i64, i64)> = (1..=MAX_CART_ITEMS as ProductId)
            .map(|pid| (pid, MAX_PRICE_CENTS, MAX_ITEM_QUANTITY))
            .collect();
        let orders: Vec<Order> = (1..=1000).map(|id| order(id, &full_cart)).collect();

        let per_order = orders[0].total_cents;
        assert!(per_order > 0);
        assert!(per_order.checked_mul(orders.len() as i64).is_none());

        let summary = summarize(&orders);
        assert_eq!(summary.total_orders, 1000);
        assert_eq!(summary.total_revenue_cents, i64::MAX);
        assert_eq!(summary.top_products.len(), MAX_CART_ITEMS);
        assert_eq!(summary.top_products[0].product_id, 1);
        assert_eq!(summary.top_products[0].units_sold, MAX_ITEM_QUANTITY * 1000);

        // Below the clamp the figures stay exact.
        let exact = summarize(&orders[..2]);
        assert_eq!(exact.total_revenue_cents, per_order * 2);
    }

    #[tokio::test]
    async fn test_inventory_and_low_stock() {
        let store = MemoryStore::with_config(StoreConfig::low_cost());
        for (name, stock) in [("A", 10), ("B", 2), ("C", 5)] {
            store
                .create_product(NewProduct {
                    name: name.to_string(),
                    price_cents: 100,
                    stock,
                })
                .await
                .unwrap();
        }

        let inventory = store.inventory_snapshot().await;
        let stocks: Vec<_> = inventory.iter().map(|s| s.stock).collect();
        assert_eq!(stocks, vec![10, 2, 5]);

        let low: Vec<_> = store
            .low_stock(5)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(low, vec!["B", "C"]);

        assert!(matches!(
            store.low_stock(-1).await,
            Err(StoreError::Validation(_))
        ));
    }
}
