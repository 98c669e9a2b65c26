//! AddItemHandler - Command handler for adding products to a cart.

use std::sync::Arc;

use crate::domain::cart::{Cart, CartError, CartIdentity, CartItem};
use crate::domain::foundation::ProductId;
use crate::ports::{CartStore, InventoryService, ProductCatalog};

use super::shared::{fetch_active_product, load_or_new, require_stock, store_failure};
use super::{CartLease, CartPolicy};

/// Command to add a quantity of a product.
#[derive(Debug, Clone)]
pub struct AddItemCommand {
    pub identity: CartIdentity,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Adds a product, merging with an existing line for the same product.
pub struct AddItemHandler {
    store: Arc<dyn CartStore>,
    catalog: Arc<dyn ProductCatalog>,
    inventory: Arc<dyn InventoryService>,
    policy: CartPolicy,
}

impl AddItemHandler {
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

    pub async fn handle(&self, cmd: AddItemCommand) -> Result<Cart, CartError> {
        tracing::debug!(
            owner_id = %cmd.identity.id(),
            product_id = %cmd.product_id,
            quantity = cmd.quantity,
            "adding item to cart"
        );

        // 1. Take the lease
        let lease =
            CartLease::acquire(self.store.clone(), cmd.identity.id(), self.policy.lock_lease)
                .await?;

        // 2-5 run under the lease; it is released on every path
        let result = self.apply(&cmd).await;
        lease.release().await;
        result
    }

    async fn apply(&self, cmd: &AddItemCommand) -> Result<Cart, CartError> {
        if cmd.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }

        // 2. Validate against catalog and inventory
        let product = fetch_active_product(self.catalog.as_ref(), &cmd.product_id).await?;
        require_stock(self.inventory.as_ref(), &cmd.product_id, cmd.quantity).await?;

        // 3. Load or create
        let (mut cart, _) = load_or_new(self.store.as_ref(), &cmd.identity, &self.policy).await?;

        // 4. Apply
        cart.add_item(
            CartItem::from_product(&product, cmd.quantity),
            self.policy.max_items,
            self.policy.max_quantity,
        )?;
        cart.extend_expiry(self.policy.ttl_for(cmd.identity.kind()));

        // 5. Persist
        self.store
            .save(&cart)
            .await
            .map_err(|e| store_failure(cmd.identity.id(), e))?;

        tracing::info!(
            owner_id = %cmd.identity.id(),
            product_id = %cmd.product_id,
            quantity = cmd.quantity,
            "item added to cart"
        );
        Ok(cart)
    }
}
