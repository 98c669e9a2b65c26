//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
///
/// Transport layers map these deterministically onto their own status
/// vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidQuantity,
    MaxItemsExceeded,
    MaxQuantityExceeded,
    InsufficientStock,
    ProductUnavailable,

    // Not found errors
    CartNotFound,
    ItemNotFound,
    ProductNotFound,

    // State errors
    CartExpired,
    ConcurrentModification,

    // Authorization errors
    Unauthorized,

    // Infrastructure errors
    CacheError,
    InternalError,
}

impl ErrorCode {
    /// Returns the broad category a caller should react to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::CartNotFound | ErrorCode::ItemNotFound | ErrorCode::ProductNotFound => {
                ErrorCategory::NotFound
            }
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidQuantity
            | ErrorCode::MaxItemsExceeded
            | ErrorCode::MaxQuantityExceeded
            | ErrorCode::InsufficientStock
            | ErrorCode::ProductUnavailable => ErrorCategory::Rejected,
            ErrorCode::CartExpired => ErrorCategory::Gone,
            ErrorCode::ConcurrentModification => ErrorCategory::Retry,
            ErrorCode::Unauthorized => ErrorCategory::Unauthorized,
            ErrorCode::CacheError | ErrorCode::InternalError => ErrorCategory::Internal,
        }
    }
}

/// How a failure should be surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The addressed resource is absent.
    NotFound,
    /// The request was understood but violates a rule.
    Rejected,
    /// The resource existed but is no longer usable.
    Gone,
    /// A concurrent writer holds the resource; try again.
    Retry,
    /// Caller identity could not be established.
    Unauthorized,
    /// Infrastructure failure.
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidQuantity => "INVALID_QUANTITY",
            ErrorCode::MaxItemsExceeded => "MAX_ITEMS_EXCEEDED",
            ErrorCode::MaxQuantityExceeded => "MAX_QUANTITY_EXCEEDED",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::ProductUnavailable => "PRODUCT_UNAVAILABLE",
            ErrorCode::CartNotFound => "CART_NOT_FOUND",
            ErrorCode::ItemNotFound => "ITEM_NOT_FOUND",
            ErrorCode::ProductNotFound => "PRODUCT_NOT_FOUND",
            ErrorCode::CartExpired => "CART_EXPIRED",
            ErrorCode::ConcurrentModification => "CONCURRENT_MODIFICATION",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::CacheError => "CACHE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
