//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the cart domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{ErrorCategory, ErrorCode, ValidationError};
pub use ids::{OwnerId, ProductId};
pub use timestamp::Timestamp;
