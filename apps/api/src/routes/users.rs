//! User route handlers.
//!
//! There are no sessions: `POST /login` only checks a credential and returns
//! the matching user.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use tienda_core::{NewUser, Order, User, UserId};
use tienda_store::{OrderReader, UserDirectory};

use crate::error::ApiResult;

/// Capabilities the user routes need.
#[derive(Clone)]
pub struct UsersState {
    pub directory: Arc<dyn UserDirectory>,
    pub orders: Arc<dyn OrderReader>,
}

/// Body of `POST /login`.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub credential: String,
}

pub fn routes(state: UsersState) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/orders", get(orders_for_user))
        .route("/login", post(login))
        .with_state(state)
}

async fn create_user(
    State(state): State<UsersState>,
    Json(input): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.directory.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(state): State<UsersState>,
    Path(id): Path<UserId>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.directory.get_user(id).await?))
}

async fn login(
    State(state): State<UsersState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<User>> {
    let user = state
        .directory
        .authenticate(&body.email, &body.credential)
        .await?;
    Ok(Json(user))
}

async fn orders_for_user(
    State(state): State<UsersState>,
    Path(id): Path<UserId>,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.orders_for_user(id).await?))
}
