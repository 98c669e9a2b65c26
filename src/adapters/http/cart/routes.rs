//! HTTP routes for cart endpoints.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::adapters::http::middleware::{auth_middleware, AuthState};

use super::handlers::{
    add_guest_item, add_item, cart_summary, clear_cart, clear_guest_cart, get_cart,
    get_guest_cart, remove_guest_item, remove_item, transfer_cart, update_guest_item,
    update_item, validate_cart, CartHandlers,
};

/// Creates the cart router: bearer-authenticated user routes plus
/// unauthenticated guest routes.
pub fn cart_routes(handlers: CartHandlers, validator: AuthState) -> Router {
    let user_routes = Router::new()
        .route("/api/v1/cart", get(get_cart).delete(clear_cart))
        .route("/api/v1/cart/items", post(add_item))
        .route(
            "/api/v1/cart/items/:product_id",
            put(update_item).delete(remove_item),
        )
        .route("/api/v1/cart/transfer", post(transfer_cart))
        .route("/api/v1/cart/validate", post(validate_cart))
        .route("/api/v1/cart/summary", get(cart_summary))
        .layer(middleware::from_fn_with_state(validator, auth_middleware));

    let guest_routes = Router::new()
        .route(
            "/api/v1/guest/cart/:guest_id",
            get(get_guest_cart).delete(clear_guest_cart),
        )
        .route("/api/v1/guest/cart/:guest_id/items", post(add_guest_item))
        .route(
            "/api/v1/guest/cart/:guest_id/items/:product_id",
            put(update_guest_item).delete(remove_guest_item),
        );

    user_routes.merge(guest_routes).with_state(handlers)
}
