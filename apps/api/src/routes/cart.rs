//! Cart route handlers.
//!
//! ```text
//! GET    /cart/{user_id}                       get_cart
//! POST   /cart/{user_id}/items                 add_to_cart
//! PUT    /cart/{user_id}/items/{product_id}    update_quantity (0 removes)
//! DELETE /cart/{user_id}/items/{product_id}    remove_from_cart
//! POST   /cart/{user_id}/checkout              checkout (201)
//! ```

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

use tienda_core::{Cart, Order, ProductId, UserId};
use tienda_store::{CartMutator, OrderWriter};

use crate::error::ApiResult;

/// Capabilities the cart routes need.
#[derive(Clone)]
pub struct CartState {
    pub carts: Arc<dyn CartMutator>,
    pub orders: Arc<dyn OrderWriter>,
}

/// Body of `POST /cart/{user_id}/items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Body of `PUT /cart/{user_id}/items/{product_id}`.
#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i64,
}

pub fn routes(state: CartState) -> Router {
    Router::new()
        .route("/cart/{user_id}", get(get_cart))
        .route("/cart/{user_id}/items", post(add_item))
        .route(
            "/cart/{user_id}/items/{product_id}",
            put(update_item).delete(remove_item),
        )
        .route("/cart/{user_id}/checkout", post(checkout))
        .with_state(state)
}

async fn get_cart(
    State(state): State<CartState>,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<Cart>> {
    Ok(Json(state.carts.get_cart(user_id).await?))
}

async fn add_item(
    State(state): State<CartState>,
    Path(user_id): Path<UserId>,
    Json(body): Json<AddItemRequest>,
) -> ApiResult<Json<Cart>> {
    let cart = state
        .carts
        .add_to_cart(user_id, body.product_id, body.quantity)
        .await?;
    Ok(Json(cart))
}

async fn update_item(
    State(state): State<CartState>,
    Path((user_id, product_id)): Path<(UserId, ProductId)>,
    Json(body): Json<QuantityRequest>,
) -> ApiResult<Json<Cart>> {
    let cart = state
        .carts
        .update_quantity(user_id, product_id, body.quantity)
        .await?;
    Ok(Json(cart))
}

async fn remove_item(
    State(state): State<CartState>,
    Path((user_id, product_id)): Path<(UserId, ProductId)>,
) -> ApiResult<Json<Cart>> {
    Ok(Json(state.carts.remove_from_cart(user_id, product_id).await?))
}

async fn checkout(
    State(state): State<CartState>,
    Path(user_id): Path<UserId>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state.orders.checkout(user_id).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
