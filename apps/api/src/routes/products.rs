//! Product route handlers.
//!
//! ```text
//! GET    /products                 list_products
//! POST   /products                 create_product  (201)
//! GET    /products/{id}            get_product
//! PUT    /products/{id}            update_product
//! DELETE /products/{id}            delete_product  (204)
//! GET    /products/{id}/stock      stock_level
//! POST   /products/{id}/restock    restock
//! ```

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use tienda_core::{NewProduct, Product, ProductId, ProductUpdate};
use tienda_store::{ProductReader, ProductWriter, StockMutator};

use crate::error::ApiResult;

/// Capabilities the product routes need.
#[derive(Clone)]
pub struct ProductsState {
    pub reader: Arc<dyn ProductReader>,
    pub writer: Arc<dyn ProductWriter>,
    pub stock: Arc<dyn StockMutator>,
}

/// Body of `POST /products/{id}/restock`.
#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub quantity: i64,
}

/// Body of `GET /products/{id}/stock`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockResponse {
    pub product_id: ProductId,
    pub stock: i64,
}

pub fn routes(state: ProductsState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/stock", get(stock_level))
        .route("/products/{id}/restock", post(restock))
        .with_state(state)
}

async fn list_products(State(state): State<ProductsState>) -> Json<Vec<Product>> {
    Json(state.reader.list_products().await)
}

async fn create_product(
    State(state): State<ProductsState>,
    Json(input): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state.writer.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(
    State(state): State<ProductsState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.reader.get_product(id).await?))
}

async fn update_product(
    State(state): State<ProductsState>,
    Path(id): Path<ProductId>,
    Json(update): Json<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.writer.update_product(id, update).await?))
}

async fn delete_product(
    State(state): State<ProductsState>,
    Path(id): Path<ProductId>,
) -> ApiResult<StatusCode> {
    state.writer.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn stock_level(
    State(state): State<ProductsState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<StockResponse>> {
    let stock = state.reader.stock_level(id).await?;
    Ok(Json(StockResponse {
        product_id: id,
        stock,
    }))
}

async fn restock(
    State(state): State<ProductsState>,
    Path(id): Path<ProductId>,
    Json(body): Json<RestockRequest>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.stock.restock(id, body.quantity).await?))
}
