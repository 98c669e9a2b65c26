//! Integration tests for cart HTTP endpoints.
//!
//! These tests send requests through the full router:
//! 1. Authentication on user routes
//! 2. JSON envelopes and status mapping
//! 3. Guest routes and guest-to-user transfer
//! 4. Correlation id propagation and health

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use cart_service::adapters::auth::MockSessionValidator;
use cart_service::adapters::cart_store::InMemoryCartStore;
use cart_service::adapters::catalog::InMemoryProductCatalog;
use cart_service::adapters::http::{build_router, CartHandlers, CORRELATION_ID_HEADER};
use cart_service::adapters::inventory::InMemoryInventory;
use cart_service::application::CartPolicy;
use cart_service::config::ServerConfig;
use cart_service::domain::cart::ProductInfo;
use cart_service::domain::foundation::ProductId;

// =============================================================================
// Test Infrastructure
// =============================================================================

const TOKEN: &str = "valid-token";

fn pid(raw: &str) -> ProductId {
    ProductId::new(raw).unwrap()
}

fn app() -> Router {
    app_with(&ServerConfig::default())
}

fn app_with(server: &ServerConfig) -> Router {
    let catalog = InMemoryProductCatalog::new()
        .with_product(ProductInfo::active(pid("prod-1"), "Widget", "10.99".parse().unwrap()))
        .with_product(ProductInfo::active(pid("prod-2"), "Gadget", "5.00".parse().unwrap()));
    let inventory = InMemoryInventory::new()
        .with_stock(pid("prod-1"), 50)
        .with_stock(pid("prod-2"), 50);

    let handlers = CartHandlers::new(
        Arc::new(InMemoryCartStore::new()),
        Arc::new(catalog),
        Arc::new(inventory),
        CartPolicy::default(),
    );
    let validator = Arc::new(MockSessionValidator::new().with_test_user(TOKEN, "user-1"));

    build_router(handlers, validator, server)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn user_routes_require_a_token() {
    let app = app();

    let (status, body) = send(&app, request(Method::GET, "/api/v1/cart", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn invalid_token_is_rejected() {
    let app = app();

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/v1/cart", Some("not-a-token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// User cart
// =============================================================================

#[tokio::test]
async fn get_cart_creates_an_empty_cart() {
    let app = app();

    let (status, body) = send(&app, request(Method::GET, "/api/v1/cart", Some(TOKEN), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["userId"], "user-1");
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["totalItems"], 0);
}

#[tokio::test]
async fn add_update_and_remove_items() {
    let app = app();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/cart/items",
            Some(TOKEN),
            Some(json!({"productId": "prod-1", "quantity": 2})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalPrice"], 21.98);
    assert_eq!(body["data"]["items"][0]["productName"], "Widget");

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            "/api/v1/cart/items/prod-1",
            Some(TOKEN),
            Some(json!({"quantity": 3})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalItems"], 3);

    let (status, body) = send(
        &app,
        request(Method::DELETE, "/api/v1/cart/items/prod-1", Some(TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
}

#[tokio::test]
async fn rule_violations_map_to_400() {
    let app = app();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/cart/items",
            Some(TOKEN),
            Some(json!({"productId": "prod-1", "quantity": 11})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MAX_QUANTITY_EXCEEDED");

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/cart/items",
            Some(TOKEN),
            Some(json!({"productId": "prod-1", "quantity": -1})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_QUANTITY");
}

#[tokio::test]
async fn path_like_product_ids_are_rejected_before_any_downstream_call() {
    let app = app();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/cart/items",
            Some(TOKEN),
            Some(json!({"productId": "../../admin/reset?x=", "quantity": 1})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["message"].as_str().unwrap().contains("product_id"));

    let (status, _) = send(
        &app,
        request(Method::DELETE, "/api/v1/cart/items/..%2Fadmin", Some(TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_product_and_missing_line_map_to_404() {
    let app = app();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/cart/items",
            Some(TOKEN),
            Some(json!({"productId": "missing", "quantity": 1})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PRODUCT_NOT_FOUND");

    // Creates the cart so the next call fails on the line, not the cart.
    send(&app, request(Method::GET, "/api/v1/cart", Some(TOKEN), None)).await;
    let (status, body) = send(
        &app,
        request(Method::DELETE, "/api/v1/cart/items/prod-2", Some(TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ITEM_NOT_FOUND");
}

#[tokio::test]
async fn clear_cart_returns_message_only() {
    let app = app();

    let (status, body) = send(&app, request(Method::DELETE, "/api/v1/cart", Some(TOKEN), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart cleared successfully");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn validate_and_summary_report_current_cart() {
    let app = app();
    send(
        &app,
        request(
            Method::POST,
            "/api/v1/cart/items",
            Some(TOKEN),
            Some(json!({"productId": "prod-2", "quantity": 2})),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/v1/cart/validate", Some(TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["adjustments"], json!([]));
    assert_eq!(body["data"]["cart"]["totalPrice"], 10.0);

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/v1/cart/summary", Some(TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalItems"], 2);
}

// =============================================================================
// Guest cart and transfer
// =============================================================================

#[tokio::test]
async fn guest_routes_need_no_token_and_transfer_moves_lines() {
    let app = app();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/guest/cart/guest-9/items",
            None,
            Some(json!({"productId": "prod-1", "quantity": 1})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userId"], "guest-9");

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/cart/transfer",
            Some(TOKEN),
            Some(json!({"guestId": "guest-9"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userId"], "user-1");
    assert_eq!(body["data"]["items"][0]["productId"], "prod-1");

    let (_, body) = send(&app, request(Method::GET, "/api/v1/guest/cart/guest-9", None, None)).await;
    assert_eq!(body["data"]["items"], json!([]));
}

#[tokio::test]
async fn guest_update_on_missing_cart_is_404() {
    let app = app();

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            "/api/v1/guest/cart/guest-1/items/prod-1",
            None,
            Some(json!({"quantity": 1})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CART_NOT_FOUND");
}

// =============================================================================
// Cross-cutting
// =============================================================================

#[tokio::test]
async fn correlation_id_is_echoed_or_generated() {
    let app = app();

    let req = Request::builder()
        .uri("/health")
        .header(CORRELATION_ID_HEADER, "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.headers()[CORRELATION_ID_HEADER], "abc-123");

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
}

#[tokio::test]
async fn configured_storefront_origin_is_allowed_and_others_are_not() {
    let app = app_with(&ServerConfig {
        cors_origins: Some("https://shop.example.com".to_string()),
        ..Default::default()
    });

    let req = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://shop.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://shop.example.com"
    );

    let req = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn health_reports_service_identity() {
    let app = app();

    let (status, body) = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "cart-service");
}
