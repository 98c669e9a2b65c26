//! Cart-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, OwnerId, ProductId, ValidationError};

/// Failures surfaced by cart model operations and cart handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// No live cart is stored for the identity.
    #[error("Cart not found: {0}")]
    NotFound(OwnerId),

    /// The cart has no line for the product.
    #[error("Item not found in cart: {0}")]
    ItemNotFound(ProductId),

    /// The catalog does not know the product, or could not be reached.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The catalog reports the product as inactive.
    #[error("Product is not available: {0}")]
    ProductUnavailable(ProductId),

    /// Inventory explicitly reported the requested quantity as unavailable.
    #[error("Insufficient stock for product {0}")]
    InsufficientStock(ProductId),

    /// Adding a new product would exceed the distinct-item ceiling.
    #[error("Maximum number of items exceeded (limit {limit})")]
    MaxItemsExceeded { limit: usize },

    /// A line quantity would exceed the per-item ceiling.
    #[error("Maximum quantity per item exceeded (limit {limit})")]
    MaxQuantityExceeded { limit: u32 },

    /// The requested quantity is not acceptable for the operation.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The cart is past its expiry and can no longer be mutated.
    #[error("Cart has expired")]
    Expired,

    /// Another request holds the cart lease.
    #[error("Cart {0} is currently being modified, please try again")]
    ConcurrentModification(OwnerId),

    /// The identities named by the request cannot be used together.
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// The backing store failed.
    #[error("Cart store failure: {0}")]
    StoreFailure(String),
}

impl CartError {
    pub fn not_found(owner_id: OwnerId) -> Self {
        CartError::NotFound(owner_id)
    }

    pub fn item_not_found(product_id: ProductId) -> Self {
        CartError::ItemNotFound(product_id)
    }

    pub fn concurrent_modification(owner_id: OwnerId) -> Self {
        CartError::ConcurrentModification(owner_id)
    }

    pub fn invalid_identity(message: impl Into<String>) -> Self {
        CartError::InvalidIdentity(message.into())
    }

    pub fn store_failure(message: impl Into<String>) -> Self {
        CartError::StoreFailure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::NotFound(_) => ErrorCode::CartNotFound,
            CartError::ItemNotFound(_) => ErrorCode::ItemNotFound,
            CartError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            CartError::ProductUnavailable(_) => ErrorCode::ProductUnavailable,
            CartError::InsufficientStock(_) => ErrorCode::InsufficientStock,
            CartError::MaxItemsExceeded { .. } => ErrorCode::MaxItemsExceeded,
            CartError::MaxQuantityExceeded { .. } => ErrorCode::MaxQuantityExceeded,
            CartError::InvalidQuantity(_) => ErrorCode::InvalidQuantity,
            CartError::Expired => ErrorCode::CartExpired,
            CartError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            CartError::InvalidIdentity(_) => ErrorCode::ValidationFailed,
            CartError::StoreFailure(_) => ErrorCode::CacheError,
        }
    }
}

impl From<ValidationError> for CartError {
    fn from(err: ValidationError) -> Self {
        CartError::InvalidIdentity(err.to_string())
    }
}
