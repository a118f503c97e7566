//! HTTP routes.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness check
//!
//! # Products
//! GET|POST        /products
//! GET|PUT|DELETE  /products/{id}
//! GET             /products/{id}/stock
//! POST            /products/{id}/restock
//!
//! # Users
//! POST /users,  GET /users/{id},  GET /users/{id}/orders,  POST /login
//!
//! # Cart
//! GET             /cart/{user_id}
//! POST            /cart/{user_id}/items
//! PUT|DELETE      /cart/{user_id}/items/{product_id}
//! POST            /cart/{user_id}/checkout
//!
//! # Orders & Reports
//! GET /orders/{id}
//! GET /reports/sales, /reports/inventory, /reports/low-stock
//! ```

pub mod cart;
pub mod orders;
pub mod products;
pub mod reports;
pub mod users;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use tienda_store::MemoryStore;

use crate::config::ApiConfig;

/// Builds the full application router around one shared store.
///
/// Each route group receives only the capabilities it uses.
pub fn router(store: Arc<MemoryStore>, config: &ApiConfig) -> Router {
    let products = products::ProductsState {
        reader: store.clone(),
        writer: store.clone(),
        stock: store.clone(),
    };
    let users = users::UsersState {
        directory: store.clone(),
        orders: store.clone(),
    };
    let cart = cart::CartState {
        carts: store.clone(),
        orders: store.clone(),
    };
    let orders = orders::OrdersState {
        orders: store.clone(),
    };
    let reports = reports::ReportsState {
        reports: store,
        top_limit: config.report_top_limit,
        low_stock_threshold: config.low_stock_threshold,
    };

    Router::new()
        .route("/health", get(health))
        .merge(products::routes(products))
        .merge(users::routes(users))
        .merge(cart::routes(cart))
        .merge(orders::routes(orders))
        .merge(reports::routes(reports))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// CORS policy: any origin, the verbs the API uses, and the usual headers.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::AUTHORIZATION,
        ])
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
