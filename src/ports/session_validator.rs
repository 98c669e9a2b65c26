//! Session validation port for bearer token validation.
//!
//! HTTP middleware uses this to turn a bearer token into the authenticated
//! user whose id keys the caller's cart.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature and expiry
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::MissingSubject` when no user id claim is present
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OwnerId;

    struct FixedValidator;

    #[async_trait]
    impl SessionValidator for FixedValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            if token == "good" {
                Ok(AuthenticatedUser::new(OwnerId::new("user-1").unwrap()))
            } else {
                Err(AuthError::InvalidToken)
            }
        }
    }

    #[tokio::test]
    async fn validator_can_be_used_as_trait_object() {
        let validator: Box<dyn SessionValidator> = Box::new(FixedValidator);
        assert_eq!(validator.validate("good").await.unwrap().id.as_str(), "user-1");
        assert!(matches!(
            validator.validate("bad").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
