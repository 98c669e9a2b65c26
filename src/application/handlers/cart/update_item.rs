//! UpdateItemHandler - Command handler for setting a line's quantity.

use std::sync::Arc;

use crate::domain::cart::{Cart, CartError, CartIdentity};
use crate::domain::foundation::ProductId;
use crate::ports::{CartStore, InventoryService, ProductCatalog};

use super::shared::{fetch_active_product, load_live_cart, require_stock, store_failure};
use super::{CartLease, CartPolicy};

/// Command to set the quantity of a product already in the cart.
///
/// Zero removes the line; negative quantities are rejected.
#[derive(Debug, Clone)]
pub struct UpdateItemCommand {
    pub identity: CartIdentity,
    pub product_id: ProductId,
    pub quantity: i64,
}

pub struct UpdateItemHandler {
    store: Arc<dyn CartStore>,
    catalog: Arc<dyn ProductCatalog>,
    inventory: Arc<dyn InventoryService>,
    policy: CartPolicy,
}

impl UpdateItemHandler {
    pub fn new(
        store: Arc<dyn CartStore>,
        catalog: Arc<dyn ProductCatalog>,
        inventory: Arc<dyn InventoryService>,
        policy: CartPolicy,
    ) -> Self {
        Self {
            store,
            catalog,
            inventory,
            policy,
        }
    }

    pub async fn handle(&self, cmd: UpdateItemCommand) -> Result<Cart, CartError> {
        tracing::debug!(
            owner_id = %cmd.identity.id(),
            product_id = %cmd.product_id,
            quantity = cmd.quantity,
            "updating cart item"
        );

        let lease =
            CartLease::acquire(self.store.clone(), cmd.identity.id(), self.policy.lock_lease)
                .await?;
        let result = self.apply(&cmd).await;
        lease.release().await;
        result
    }

    async fn apply(&self, cmd: &UpdateItemCommand) -> Result<Cart, CartError> {
        // 1. Load
        let mut cart = load_live_cart(self.store.as_ref(), cmd.identity.id())
            .await?
            .ok_or_else(|| CartError::not_found(cmd.identity.id().clone()))?;

        // 2. Validate only a real increase; removals never consult collaborators
        if cmd.quantity > 0 && cmd.quantity <= i64::from(self.policy.max_quantity) {
            if let Ok(current) = cart.get_item(&cmd.product_id).map(|line| line.quantity()) {
                fetch_active_product(self.catalog.as_ref(), &cmd.product_id).await?;

                let requested = cmd.quantity as u32;
                if requested > current {
                    require_stock(
                        self.inventory.as_ref(),
                        &cmd.product_id,
                        requested - current,
                    )
                    .await?;
                }
            }
        }

        // 3. Apply
        cart.update_item_quantity(&cmd.product_id, cmd.quantity, self.policy.max_quantity)?;
        cart.extend_expiry(self.policy.ttl_for(cmd.identity.kind()));

        // 4. Persist
        self.store
            .save(&cart)
            .await
            .map_err(|e| store_failure(cmd.identity.id(), e))?;

        tracing::info!(
            owner_id = %cmd.identity.id(),
            product_id = %cmd.product_id,
            quantity = cmd.quantity,
            "cart item updated"
        );
        Ok(cart)
    }
}
