//! Report route handlers.
//!
//! ```text
//! GET /reports/sales?limit=N          sales summary, top list truncated to N
//! GET /reports/inventory              stock of every product
//! GET /reports/low-stock?threshold=N  products with stock <= N
//! ```
//!
//! Missing query parameters fall back to the configured defaults.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use tienda_core::{SalesSummary, StockLevel};
use tienda_store::ReportReader;

use crate::error::ApiResult;

/// Capability plus query defaults for the report routes.
#[derive(Clone)]
pub struct ReportsState {
    pub reports: Arc<dyn ReportReader>,
    pub top_limit: usize,
    pub low_stock_threshold: i64,
}

#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<i64>,
}

pub fn routes(state: ReportsState) -> Router {
    Router::new()
        .route("/reports/sales", get(sales))
        .route("/reports/inventory", get(inventory))
        .route("/reports/low-stock", get(low_stock))
        .with_state(state)
}

async fn sales(
    State(state): State<ReportsState>,
    Query(query): Query<SalesQuery>,
) -> Json<SalesSummary> {
    let mut summary = state.reports.sales_summary().await;
    summary
        .top_products
        .truncate(query.limit.unwrap_or(state.top_limit));
    Json(summary)
}

async fn inventory(State(state): State<ReportsState>) -> Json<Vec<StockLevel>> {
    Json(state.reports.inventory_snapshot().await)
}

async fn low_stock(
    State(state): State<ReportsState>,
    Query(query): Query<LowStockQuery>,
) -> ApiResult<Json<Vec<StockLevel>>> {
    let threshold = query.threshold.unwrap_or(state.low_stock_threshold);
    Ok(Json(state.reports.low_stock(threshold).await?))
}
