//! HTTP handlers for cart endpoints.
//!
//! User routes take the owner from the bearer token; guest routes take it
//! from the path. Both funnel into the same per-operation functions.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    AddItemCommand, AddItemHandler, CartPolicy, ClearCartCommand, ClearCartHandler,
    GetCartHandler, GetCartQuery, GetCartSummaryHandler, RemoveItemCommand, RemoveItemHandler,
    TransferCartCommand, TransferCartHandler, UpdateItemCommand, UpdateItemHandler,
    ValidateCartHandler, ValidateCartQuery,
};
use crate::domain::cart::{CartError, CartIdentity};
use crate::domain::foundation::{ErrorCategory, OwnerId, ProductId};
use crate::ports::{CartStore, InventoryService, ProductCatalog};

use super::dto::{
    AddItemRequest, ApiResponse, CartResponse, CartSummaryResponse, ErrorResponse,
    TransferRequest, UpdateItemRequest, ValidatedCartResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CartHandlers {
    get_handler: Arc<GetCartHandler>,
    add_handler: Arc<AddItemHandler>,
    update_handler: Arc<UpdateItemHandler>,
    remove_handler: Arc<RemoveItemHandler>,
    clear_handler: Arc<ClearCartHandler>,
    transfer_handler: Arc<TransferCartHandler>,
    validate_handler: Arc<ValidateCartHandler>,
    summary_handler: Arc<GetCartSummaryHandler>,
}

impl CartHandlers {
    /// Builds every cart handler over the same ports and policy.
    pub fn new(
        store: Arc<dyn CartStore>,
        catalog: Arc<dyn ProductCatalog>,
        inventory: Arc<dyn InventoryService>,
        policy: CartPolicy,
    ) -> Self {
        let validate = || {
            ValidateCartHandler::new(store.clone(), catalog.clone(), inventory.clone())
        };

        Self {
            get_handler: Arc::new(GetCartHandler::new(store.clone(), policy.clone())),
            add_handler: Arc::new(AddItemHandler::new(
                store.clone(),
                catalog.clone(),
                inventory.clone(),
                policy.clone(),
            )),
            update_handler: Arc::new(UpdateItemHandler::new(
                store.clone(),
                catalog.clone(),
                inventory.clone(),
                policy.clone(),
            )),
            remove_handler: Arc::new(RemoveItemHandler::new(store.clone(), policy.clone())),
            clear_handler: Arc::new(ClearCartHandler::new(store.clone(), policy.clone())),
            transfer_handler: Arc::new(TransferCartHandler::new(store.clone(), policy)),
            validate_handler: Arc::new(validate()),
            summary_handler: Arc::new(GetCartSummaryHandler::new(validate())),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Authenticated user endpoints
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/cart
pub async fn get_cart(
    State(handlers): State<CartHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    get_for(&handlers, CartIdentity::user(user.id)).await
}

/// POST /api/v1/cart/items
pub async fn add_item(
    State(handlers): State<CartHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AddItemRequest>,
) -> Response {
    add_for(&handlers, CartIdentity::user(user.id), req).await
}

/// PUT /api/v1/cart/items/:product_id
pub async fn update_item(
    State(handlers): State<CartHandlers>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Response {
    update_for(&handlers, CartIdentity::user(user.id), product_id, req).await
}

/// DELETE /api/v1/cart/items/:product_id
pub async fn remove_item(
    State(handlers): State<CartHandlers>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<String>,
) -> Response {
    remove_for(&handlers, CartIdentity::user(user.id), product_id).await
}

/// DELETE /api/v1/cart
pub async fn clear_cart(
    State(handlers): State<CartHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    clear_for(&handlers, CartIdentity::user(user.id)).await
}

/// POST /api/v1/cart/transfer - Merge a guest cart into the caller's cart
pub async fn transfer_cart(
    State(handlers): State<CartHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<TransferRequest>,
) -> Response {
    let guest_id = match OwnerId::new(req.guest_id) {
        Ok(id) => id,
        Err(_) => return bad_request("Guest ID is required"),
    };

    let cmd = TransferCartCommand {
        guest_id,
        user_id: user.id,
    };

    match handlers.transfer_handler.handle(cmd).await {
        Ok(cart) => ok(
            "Guest cart transferred successfully",
            CartResponse::from(&cart),
        ),
        Err(e) => handle_cart_error(e),
    }
}

/// POST /api/v1/cart/validate - Reconcile the cart with catalog and stock
pub async fn validate_cart(
    State(handlers): State<CartHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ValidateCartQuery {
        identity: CartIdentity::user(user.id),
    };

    match handlers.validate_handler.handle(query).await {
        Ok(result) => {
            let response = ValidatedCartResponse {
                cart: CartResponse::from(&result.cart),
                adjustments: result.adjustments,
            };
            ok("Cart validated successfully", response)
        }
        Err(e) => handle_cart_error(e),
    }
}

/// GET /api/v1/cart/summary - Validated checkout preview
pub async fn cart_summary(
    State(handlers): State<CartHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ValidateCartQuery {
        identity: CartIdentity::user(user.id),
    };

    match handlers.summary_handler.handle(query).await {
        Ok(summary) => ok(
            "Cart summary retrieved successfully",
            CartSummaryResponse::from(&summary),
        ),
        Err(e) => handle_cart_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Guest endpoints
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/guest/cart/:guest_id
pub async fn get_guest_cart(
    State(handlers): State<CartHandlers>,
    Path(guest_id): Path<String>,
) -> Response {
    match guest(&guest_id) {
        Ok(identity) => get_for(&handlers, identity).await,
        Err(response) => response,
    }
}

/// POST /api/v1/guest/cart/:guest_id/items
pub async fn add_guest_item(
    State(handlers): State<CartHandlers>,
    Path(guest_id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Response {
    match guest(&guest_id) {
        Ok(identity) => add_for(&handlers, identity, req).await,
        Err(response) => response,
    }
}

/// PUT /api/v1/guest/cart/:guest_id/items/:product_id
pub async fn update_guest_item(
    State(handlers): State<CartHandlers>,
    Path((guest_id, product_id)): Path<(String, String)>,
    Json(req): Json<UpdateItemRequest>,
) -> Response {
    match guest(&guest_id) {
        Ok(identity) => update_for(&handlers, identity, product_id, req).await,
        Err(response) => response,
    }
}

/// DELETE /api/v1/guest/cart/:guest_id/items/:product_id
pub async fn remove_guest_item(
    State(handlers): State<CartHandlers>,
    Path((guest_id, product_id)): Path<(String, String)>,
) -> Response {
    match guest(&guest_id) {
        Ok(identity) => remove_for(&handlers, identity, product_id).await,
        Err(response) => response,
    }
}

/// DELETE /api/v1/guest/cart/:guest_id
pub async fn clear_guest_cart(
    State(handlers): State<CartHandlers>,
    Path(guest_id): Path<String>,
) -> Response {
    match guest(&guest_id) {
        Ok(identity) => clear_for(&handlers, identity).await,
        Err(response) => response,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Shared operation bodies
// ════════════════════════════════════════════════════════════════════════════

async fn get_for(handlers: &CartHandlers, identity: CartIdentity) -> Response {
    match handlers.get_handler.handle(GetCartQuery { identity }).await {
        Ok(cart) => ok("Cart retrieved successfully", CartResponse::from(&cart)),
        Err(e) => handle_cart_error(e),
    }
}

async fn add_for(handlers: &CartHandlers, identity: CartIdentity, req: AddItemRequest) -> Response {
    let product_id = match ProductId::new(req.product_id) {
        Ok(id) => id,
        Err(e) => return bad_request(&e.to_string()),
    };
    // Negative and oversized quantities never reach the handler as u32.
    let quantity = match u32::try_from(req.quantity) {
        Ok(q) => q,
        Err(_) => return handle_cart_error(CartError::InvalidQuantity(req.quantity)),
    };

    let cmd = AddItemCommand {
        identity,
        product_id,
        quantity,
    };

    match handlers.add_handler.handle(cmd).await {
        Ok(cart) => ok("Item added to cart successfully", CartResponse::from(&cart)),
        Err(e) => handle_cart_error(e),
    }
}

async fn update_for(
    handlers: &CartHandlers,
    identity: CartIdentity,
    product_id: String,
    req: UpdateItemRequest,
) -> Response {
    let product_id = match ProductId::new(product_id) {
        Ok(id) => id,
        Err(e) => return bad_request(&e.to_string()),
    };

    let cmd = UpdateItemCommand {
        identity,
        product_id,
        quantity: req.quantity,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(cart) => ok("Cart item updated successfully", CartResponse::from(&cart)),
        Err(e) => handle_cart_error(e),
    }
}

async fn remove_for(handlers: &CartHandlers, identity: CartIdentity, product_id: String) -> Response {
    let product_id = match ProductId::new(product_id) {
        Ok(id) => id,
        Err(e) => return bad_request(&e.to_string()),
    };

    let cmd = RemoveItemCommand {
        identity,
        product_id,
    };

    match handlers.remove_handler.handle(cmd).await {
        Ok(cart) => ok("Item removed from cart successfully", CartResponse::from(&cart)),
        Err(e) => handle_cart_error(e),
    }
}

async fn clear_for(handlers: &CartHandlers, identity: CartIdentity) -> Response {
    match handlers.clear_handler.handle(ClearCartCommand { identity }).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::message_only("Cart cleared successfully")),
        )
            .into_response(),
        Err(e) => handle_cart_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response helpers
// ════════════════════════════════════════════════════════════════════════════

fn guest(raw: &str) -> Result<CartIdentity, Response> {
    CartIdentity::parse_guest(raw).map_err(|_| bad_request("Guest ID is required"))
}

fn ok<T: serde::Serialize>(message: &str, data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::ok(message, data))).into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

/// Maps cart errors onto HTTP statuses by error category.
fn handle_cart_error(error: CartError) -> Response {
    let code = error.code();
    let status = match code.category() {
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Rejected => StatusCode::BAD_REQUEST,
        ErrorCategory::Gone => StatusCode::GONE,
        ErrorCategory::Retry => StatusCode::CONFLICT,
        ErrorCategory::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCategory::Internal => {
            tracing::error!(error = %error, "cart operation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response();
        }
    };

    (status, Json(ErrorResponse::new(code, error.to_string()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OwnerId;

    fn owner() -> OwnerId {
        OwnerId::new("user-1").unwrap()
    }

    #[test]
    fn not_found_errors_map_to_404() {
        let response = handle_cart_error(CartError::not_found(owner()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            handle_cart_error(CartError::item_not_found(ProductId::new("p").unwrap()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rule_violations_map_to_400() {
        for error in [
            CartError::MaxItemsExceeded { limit: 100 },
            CartError::MaxQuantityExceeded { limit: 10 },
            CartError::InvalidQuantity(-1),
            CartError::InsufficientStock(ProductId::new("p").unwrap()),
            CartError::invalid_identity("same cart"),
        ] {
            assert_eq!(handle_cart_error(error).status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn expired_maps_to_410_and_contention_to_409() {
        assert_eq!(handle_cart_error(CartError::Expired).status(), StatusCode::GONE);
        assert_eq!(
            handle_cart_error(CartError::concurrent_modification(owner())).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn store_failure_maps_to_500() {
        let response = handle_cart_error(CartError::store_failure("connection reset"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn blank_guest_id_is_rejected() {
        let response = guest("  ").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
