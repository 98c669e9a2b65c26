//! Top-level router: cart routes, health, and the shared middleware stack.

use axum::{routing::get, Router};
use http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{CorsOrigins, ServerConfig};

use super::cart::{cart_routes, CartHandlers};
use super::health::health;
use super::middleware::AuthState;

/// Header carrying the per-request correlation id.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Builds the full application router.
pub fn build_router(handlers: CartHandlers, validator: AuthState, server: &ServerConfig) -> Router {
    let correlation_id = HeaderName::from_static(CORRELATION_ID_HEADER);

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            correlation_id.clone(),
            MakeRequestUuid,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(correlation_id))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server.cors()));

    Router::new()
        .route("/health", get(health))
        .merge(cart_routes(handlers, validator))
        .layer(middleware)
}

fn cors_layer(origins: CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let origins = match origins {
        CorsOrigins::Any => return layer.allow_origin(Any),
        CorsOrigins::List(origins) => origins,
    };

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(parsed)
}
