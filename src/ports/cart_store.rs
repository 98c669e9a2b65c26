//! Cart store port.
//!
//! The store holds serialized carts keyed by owner and provides the per-owner
//! lease used to serialize mutations. All shared cart state lives behind this
//! trait; handlers never cache carts in process.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::cart::{Cart, CartError};
use crate::domain::foundation::OwnerId;

/// Shortest store-native TTL written for a cart, even if it is about to expire.
pub const MIN_STORE_TTL: Duration = Duration::from_secs(60);

/// Key under which a cart is stored.
pub fn cart_key(owner_id: &OwnerId) -> String {
    format!("cart:{}", owner_id)
}

/// Key under which the cart lease is held.
pub fn lock_key(owner_id: &OwnerId) -> String {
    format!("cart_lock:{}", owner_id)
}

/// Store-native TTL for a cart: its remaining lifetime, floored at one minute.
pub fn store_ttl_for(cart: &Cart) -> Duration {
    cart.remaining_lifetime()
        .to_std()
        .map(|remaining| remaining.max(MIN_STORE_TTL))
        .unwrap_or(MIN_STORE_TTL)
}

/// Persistent cart storage with lease-based mutual exclusion.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Fetch the stored cart, including logically expired ones.
    async fn get(&self, owner_id: &OwnerId) -> Result<Option<Cart>, StoreError>;

    /// Write the cart with a TTL from [`store_ttl_for`].
    async fn save(&self, cart: &Cart) -> Result<(), StoreError>;

    /// Remove the cart. Deleting an absent cart succeeds.
    async fn delete(&self, owner_id: &OwnerId) -> Result<(), StoreError>;

    async fn exists(&self, owner_id: &OwnerId) -> Result<bool, StoreError>;

    /// Remaining store-native TTL, or `None` if no record exists.
    async fn ttl(&self, owner_id: &OwnerId) -> Result<Option<Duration>, StoreError>;

    /// Atomically take the lease if nobody holds it.
    ///
    /// Returns `false` when another holder has it. The lease expires on its
    /// own after `lease`.
    async fn acquire_lock(&self, owner_id: &OwnerId, lease: Duration) -> Result<bool, StoreError>;

    /// Drop the lease unconditionally.
    async fn release_lock(&self, owner_id: &OwnerId) -> Result<(), StoreError>;
}

/// Cart store failures.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend could not be reached or returned an I/O error.
    #[error("cart store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be encoded or decoded.
    #[error("cart serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<StoreError> for CartError {
    fn from(err: StoreError) -> Self {
        CartError::store_failure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn owner() -> OwnerId {
        OwnerId::new("user-7").unwrap()
    }

    #[test]
    fn keys_are_namespaced_by_owner() {
        assert_eq!(cart_key(&owner()), "cart:user-7");
        assert_eq!(lock_key(&owner()), "cart_lock:user-7");
    }

    #[test]
    fn store_ttl_mirrors_remaining_lifetime() {
        let cart = Cart::new(owner(), ChronoDuration::hours(2));
        let ttl = store_ttl_for(&cart);
        assert!(ttl > Duration::from_secs(7_100) && ttl <= Duration::from_secs(7_200));
    }

    #[test]
    fn store_ttl_is_floored_at_one_minute() {
        let soon = Cart::new(owner(), ChronoDuration::seconds(5));
        assert_eq!(store_ttl_for(&soon), MIN_STORE_TTL);

        let expired = Cart::new(owner(), ChronoDuration::seconds(-30));
        assert_eq!(store_ttl_for(&expired), MIN_STORE_TTL);
    }

    #[test]
    fn store_errors_become_store_failures() {
        let err: CartError = StoreError::Unavailable("connection refused".into()).into();
        assert!(matches!(err, CartError::StoreFailure(msg) if msg.contains("connection refused")));
    }

    #[test]
    fn cart_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CartStore) {}
    }
}
