//! HTTP DTOs for cart endpoints.
//!
//! Monetary amounts leave the service as JSON numbers; the domain keeps them
//! as exact decimals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::CartAdjustment;
use crate::domain::cart::{Cart, CartItem, CartSummary};
use crate::domain::foundation::{ErrorCode, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to add a product to a cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Request to set a line's quantity. Zero removes the line.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i64,
}

/// Request to merge a guest cart into the caller's cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub guest_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Success envelope shared by every cart endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub sku: String,
    pub price: f64,
    pub quantity: u32,
    pub image_url: String,
    pub category: String,
    pub subtotal: f64,
    pub added_at: Timestamp,
}

impl From<&CartItem> for CartItemResponse {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id().to_string(),
            product_name: item.product_name().to_string(),
            sku: item.sku().to_string(),
            price: money(item.price()),
            quantity: item.quantity(),
            image_url: item.image_url().to_string(),
            category: item.category().to_string(),
            subtotal: money(item.subtotal()),
            added_at: *item.added_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub user_id: String,
    pub items: Vec<CartItemResponse>,
    pub total_price: f64,
    pub total_items: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub expires_at: Timestamp,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            user_id: cart.owner_id().to_string(),
            items: cart.items().iter().map(CartItemResponse::from).collect(),
            total_price: money(cart.total_price()),
            total_items: cart.total_items(),
            created_at: *cart.created_at(),
            updated_at: *cart.updated_at(),
            expires_at: *cart.expires_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummaryResponse {
    pub user_id: String,
    pub items: Vec<CartItemResponse>,
    pub total_price: f64,
    pub total_items: u64,
}

impl From<&CartSummary> for CartSummaryResponse {
    fn from(summary: &CartSummary) -> Self {
        Self {
            user_id: summary.owner_id.to_string(),
            items: summary.items.iter().map(CartItemResponse::from).collect(),
            total_price: money(summary.total_price),
            total_items: summary.total_items,
        }
    }
}

/// Cart after reconciliation, with what changed.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedCartResponse {
    pub cart: CartResponse,
    pub adjustments: Vec<CartAdjustment>,
}

/// Error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// Nearest `f64` to the exact decimal amount.
fn money(amount: Decimal) -> f64 {
    amount.to_string().parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{OwnerId, ProductId};
    use chrono::Duration;

    #[test]
    fn add_item_request_deserializes_camel_case() {
        let json = r#"{"productId": "prod-1", "quantity": 2}"#;
        let req: AddItemRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.product_id, "prod-1");
        assert_eq!(req.quantity, 2);
    }

    #[test]
    fn update_item_request_accepts_negative_quantity() {
        let req: UpdateItemRequest = serde_json::from_str(r#"{"quantity": -1}"#).unwrap();
        assert_eq!(req.quantity, -1);
    }

    #[test]
    fn transfer_request_reads_guest_id() {
        let req: TransferRequest = serde_json::from_str(r#"{"guestId": "g-1"}"#).unwrap();
        assert_eq!(req.guest_id, "g-1");
    }

    #[test]
    fn cart_response_uses_user_id_and_numeric_totals() {
        let mut cart = Cart::new(OwnerId::new("user-1").unwrap(), Duration::days(30));
        let item = CartItem::new(
            ProductId::new("prod-1").unwrap(),
            "10.99".parse().unwrap(),
            2,
        );
        cart.add_item(item, 100, 10).unwrap();

        let json = serde_json::to_value(CartResponse::from(&cart)).unwrap();
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["totalPrice"], 21.98);
        assert_eq!(json["items"][0]["productId"], "prod-1");
        assert_eq!(json["items"][0]["subtotal"], 21.98);
    }

    #[test]
    fn api_response_omits_absent_data() {
        let json = serde_json::to_value(ApiResponse::message_only("Cart cleared successfully"))
            .unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn error_response_carries_code() {
        let error = ErrorResponse::new(ErrorCode::CartNotFound, "Cart not found: u-1");
        assert!(!error.success);
        assert_eq!(error.code, "CART_NOT_FOUND");
    }
}
