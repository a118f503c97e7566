//! Order route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use tienda_core::{Order, OrderId};
use tienda_store::OrderReader;

use crate::error::ApiResult;

#[derive(Clone)]
pub struct OrdersState {
    pub orders: Arc<dyn OrderReader>,
}

pub fn routes(state: OrdersState) -> Router {
    Router::new()
        .route("/orders/{id}", get(get_order))
        .with_state(state)
}

async fn get_order(
    State(state): State<OrdersState>,
    Path(id): Path<OrderId>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.get_order(id).await?))
}
