//! HTTP-level tests: the full router driven with `oneshot` requests.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use tienda_api::{router, ApiConfig};
use tienda_store::{MemoryStore, StoreConfig};

fn app() -> Router {
    let store = Arc::new(MemoryStore::with_config(StoreConfig::low_cost()));
    router(store, &ApiConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn seed_widget_and_user(app: &Router) {
    let (status, _) = send(
        app,
        Method::POST,
        "/products",
        Some(json!({ "name": "Widget", "priceCents": 1000, "stock": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Ana", "email": "ana@example.com", "credential": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn health_is_ok() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/products")
        .header(header::ORIGIN, "http://shop.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_string();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }

    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_lowercase();
    for name in ["accept", "content-type", "content-length", "authorization"] {
        assert!(allowed.contains(name), "missing {name} in {allowed}");
    }
}

#[tokio::test]
async fn checkout_flow_over_http() {
    let app = app();
    seed_widget_and_user(&app).await;

    let (status, cart) = send(
        &app,
        Method::POST,
        "/cart/1/items",
        Some(json!({ "productId": 1, "quantity": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["quantity"], 3);

    let (status, order) = send(&app, Method::POST, "/cart/1/checkout", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["totalCents"], 3000);
    assert_eq!(order["lines"][0]["nameSnapshot"], "Widget");

    let (_, stock) = send(&app, Method::GET, "/products/1/stock", None).await;
    assert_eq!(stock, json!({ "productId": 1, "stock": 2 }));

    let (status, fetched) = send(&app, Method::GET, "/orders/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, order);

    let (_, history) = send(&app, Method::GET, "/users/1/orders", None).await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));

    // Second attempt exceeds remaining stock.
    send(
        &app,
        Method::POST,
        "/cart/1/items",
        Some(json!({ "productId": 1, "quantity": 3 })),
    )
    .await;
    let (status, error) = send(&app, Method::POST, "/cart/1/checkout", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "insufficient_stock");
}

#[tokio::test]
async fn error_kinds_map_to_status_codes() {
    let app = app();
    seed_widget_and_user(&app).await;

    // Validation
    let (status, error) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({ "name": "Bad", "priceCents": -1, "stock": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "validation");

    // NotFound
    let (status, error) = send(&app, Method::GET, "/products/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "not_found");

    // Conflict: duplicate email
    let (status, _) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Ana 2", "email": "ANA@example.com", "credential": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // EmptyCart
    let (status, error) = send(&app, Method::POST, "/cart/1/checkout", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "empty_cart");

    // Unauthorized
    let (status, _) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "ana@example.com", "credential": "wrong horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Conflict: product still in a cart
    send(
        &app,
        Method::POST,
        "/cart/1/items",
        Some(json!({ "productId": 1, "quantity": 1 })),
    )
    .await;
    let (status, _) = send(&app, Method::DELETE, "/products/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_returns_user_without_credential() {
    let app = app();
    seed_widget_and_user(&app).await;

    let (status, user) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "ana@example.com", "credential": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["id"], 1);
    assert!(user.get("credential").is_none());
    assert!(user.get("credentialHash").is_none());
}

#[tokio::test]
async fn cart_line_edits() {
    let app = app();
    seed_widget_and_user(&app).await;

    send(
        &app,
        Method::POST,
        "/cart/1/items",
        Some(json!({ "productId": 1, "quantity": 2 })),
    )
    .await;

    let (status, cart) = send(
        &app,
        Method::PUT,
        "/cart/1/items/1",
        Some(json!({ "quantity": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["quantity"], 4);

    let (status, cart) = send(&app, Method::DELETE, "/cart/1/items/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"], json!([]));

    let (status, _) = send(&app, Method::DELETE, "/cart/1/items/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/cart/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_maintenance() {
    let app = app();
    seed_widget_and_user(&app).await;

    let (status, product) = send(
        &app,
        Method::PUT,
        "/products/1",
        Some(json!({ "priceCents": 1250 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["priceCents"], 1250);
    assert_eq!(product["name"], "Widget");

    let (status, product) = send(
        &app,
        Method::POST,
        "/products/1/restock",
        Some(json!({ "quantity": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["stock"], 15);

    let (status, _) = send(&app, Method::DELETE, "/products/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn reports_respect_query_parameters() {
    let app = app();
    seed_widget_and_user(&app).await;
    send(
        &app,
        Method::POST,
        "/products",
        Some(json!({ "name": "Gadget", "priceCents": 500, "stock": 50 })),
    )
    .await;

    for (product_id, quantity) in [(1, 1), (2, 4)] {
        send(
            &app,
            Method::POST,
            "/cart/1/items",
            Some(json!({ "productId": product_id, "quantity": quantity })),
        )
        .await;
    }
    send(&app, Method::POST, "/cart/1/checkout", None).await;

    let (status, summary) = send(&app, Method::GET, "/reports/sales?limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalRevenueCents"], 3000);
    assert_eq!(summary["totalOrders"], 1);
    assert_eq!(summary["topProducts"].as_array().map(Vec::len), Some(1));
    assert_eq!(summary["topProducts"][0]["productId"], 2);

    let (_, inventory) = send(&app, Method::GET, "/reports/inventory", None).await;
    assert_eq!(inventory[0]["stock"], 4);
    assert_eq!(inventory[1]["stock"], 46);

    // Default threshold is 5.
    let (_, low) = send(&app, Method::GET, "/reports/low-stock", None).await;
    assert_eq!(low.as_array().map(Vec::len), Some(1));

    let (_, low) = send(&app, Method::GET, "/reports/low-stock?threshold=100", None).await;
    assert_eq!(low.as_array().map(Vec::len), Some(2));

    let (status, _) = send(&app, Method::GET, "/reports/low-stock?threshold=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
