//! GetCartHandler - Query handler returning the caller's cart.

use std::sync::Arc;

use crate::domain::cart::{Cart, CartError, CartIdentity};
use crate::ports::CartStore;

use super::shared::{load_or_new, store_failure};
use super::CartPolicy;

/// Query for the cart owned by an identity.
#[derive(Debug, Clone)]
pub struct GetCartQuery {
    pub identity: CartIdentity,
}

/// Returns the live cart, creating and persisting an empty one when none
/// exists. Reads take no lease.
pub struct GetCartHandler {
    store: Arc<dyn CartStore>,
    policy: CartPolicy,
}

impl GetCartHandler {
    pub fn new(store: Arc<dyn CartStore>, policy: CartPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn handle(&self, query: GetCartQuery) -> Result<Cart, CartError> {
        get_or_create(self.store.as_ref(), &query.identity, &self.policy).await
    }
}

pub(crate) async fn get_or_create(
    store: &dyn CartStore,
    identity: &CartIdentity,
    policy: &CartPolicy,
) -> Result<Cart, CartError> {
    let (cart, created) = load_or_new(store, identity, policy).await?;
    if created {
        store
            .save(&cart)
            .await
            .map_err(|e| store_failure(identity.id(), e))?;
        tracing::info!(owner_id = %identity.id(), kind = ?identity.kind(), "cart created");
    }
    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cart_store::InMemoryCartStore;
    use crate::domain::foundation::OwnerId;
    use chrono::Duration;

    fn guest() -> CartIdentity {
        CartIdentity::guest(OwnerId::new("guest-9").unwrap())
    }

    #[tokio::test]
    async fn creates_and_persists_missing_cart() {
        let store = Arc::new(InMemoryCartStore::new());
        let handler = GetCartHandler::new(store.clone(), CartPolicy::default());

        let cart = handler.handle(GetCartQuery { identity: guest() }).await.unwrap();

        assert!(cart.is_empty());
        assert!(store.exists(guest().id()).await.unwrap());
    }

    #[tokio::test]
    async fn guest_cart_gets_guest_lifetime() {
        let store = Arc::new(InMemoryCartStore::new());
        let handler = GetCartHandler::new(store, CartPolicy::default());

        let cart = handler.handle(GetCartQuery { identity: guest() }).await.unwrap();

        let lifetime = cart.remaining_lifetime();
        assert!(lifetime <= Duration::days(3) && lifetime > Duration::days(2));
    }

    #[tokio::test]
    async fn returns_existing_cart_unchanged() {
        let store = Arc::new(InMemoryCartStore::new());
        let handler = GetCartHandler::new(store.clone(), CartPolicy::default());
        let first = handler.handle(GetCartQuery { identity: guest() }).await.unwrap();

        let second = handler.handle(GetCartQuery { identity: guest() }).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn expired_record_is_replaced_by_fresh_cart() {
        let store = Arc::new(InMemoryCartStore::new());
        let stale = Cart::new(guest().id().clone(), Duration::seconds(-10));
        store.save(&stale).await.unwrap();
        let handler = GetCartHandler::new(store.clone(), CartPolicy::default());

        let cart = handler.handle(GetCartQuery { identity: guest() }).await.unwrap();

        assert!(!cart.is_expired());
        let stored = store.get(guest().id()).await.unwrap().unwrap();
        assert!(!stored.is_expired());
    }

    #[tokio::test]
    async fn store_outage_is_a_store_failure() {
        let store = Arc::new(InMemoryCartStore::new());
        store.set_unavailable(true);
        let handler = GetCartHandler::new(store, CartPolicy::default());

        let result = handler.handle(GetCartQuery { identity: guest() }).await;

        assert!(matches!(result, Err(CartError::StoreFailure(_))));
    }
}
