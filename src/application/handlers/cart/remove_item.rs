//! RemoveItemHandler - Command handler for removing a product line.

use std::sync::Arc;

use crate::domain::cart::{Cart, CartError, CartIdentity};
use crate::domain::foundation::ProductId;
use crate::ports::CartStore;

use super::shared::{load_live_cart, store_failure};
use super::{CartLease, CartPolicy};

#[derive(Debug, Clone)]
pub struct RemoveItemCommand {
    pub identity: CartIdentity,
    pub product_id: ProductId,
}

pub struct RemoveItemHandler {
    store: Arc<dyn CartStore>,
    policy: CartPolicy,
}

impl RemoveItemHandler {
    pub fn new(store: Arc<dyn CartStore>, policy: CartPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn handle(&self, cmd: RemoveItemCommand) -> Result<Cart, CartError> {
        let lease =
            CartLease::acquire(self.store.clone(), cmd.identity.id(), self.policy.lock_lease)
                .await?;
        let result = self.apply(&cmd).await;
        lease.release().await;
        result
    }

    async fn apply(&self, cmd: &RemoveItemCommand) -> Result<Cart, CartError> {
        let mut cart = load_live_cart(self.store.as_ref(), cmd.identity.id())
            .await?
            .ok_or_else(|| CartError::not_found(cmd.identity.id().clone()))?;

        cart.remove_item(&cmd.product_id)?;
        cart.extend_expiry(self.policy.ttl_for(cmd.identity.kind()));

        self.store
            .save(&cart)
            .await
            .map_err(|e| store_failure(cmd.identity.id(), e))?;

        tracing::info!(
            owner_id = %cmd.identity.id(),
            product_id = %cmd.product_id,
            "item removed from cart"
        );
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{AddItemCommand, AddItemHandler};
    use super::*;

    #[tokio::test]
    async fn removes_line_and_recomputes() {
        let f = Fixture::new();
        let add = AddItemHandler::new(
            f.store.clone(),
            f.catalog.clone(),
            f.inventory.clone(),
            f.policy.clone(),
        );
        for (product, quantity) in [("prod-1", 1), ("prod-2", 2)] {
            add.handle(AddItemCommand {
                identity: guest("g-1"),
                product_id: pid(product),
                quantity,
            })
            .await
            .unwrap();
        }
        let handler = RemoveItemHandler::new(f.store.clone(), f.policy.clone());

        let cart = handler
            .handle(RemoveItemCommand {
                identity: guest("g-1"),
                product_id: pid("prod-1"),
            })
            .await
            .unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_price(), dec("10.00"));
    }

    #[tokio::test]
    async fn missing_cart_is_not_found() {
        let f = Fixture::new();
        let handler = RemoveItemHandler::new(f.store.clone(), f.policy.clone());

        let result = handler
            .handle(RemoveItemCommand {
                identity: guest("g-1"),
                product_id: pid("prod-1"),
            })
            .await;

        assert!(matches!(result, Err(CartError::NotFound(_))));
    }

    #[tokio::test]
    async fn absent_line_is_item_not_found() {
        let f = Fixture::new();
        f.store
            .save(&Cart::new(guest("g-1").id().clone(), chrono::Duration::days(1)))
            .await
            .unwrap();
        let handler = RemoveItemHandler::new(f.store.clone(), f.policy.clone());

        let result = handler
            .handle(RemoveItemCommand {
                identity: guest("g-1"),
                product_id: pid("prod-1"),
            })
            .await;

        assert_eq!(result, Err(CartError::ItemNotFound(pid("prod-1"))));
    }
}
