//! ClearCartHandler - Command handler for discarding a cart.

use std::sync::Arc;

use crate::domain::cart::{CartError, CartIdentity};
use crate::ports::CartStore;

use super::shared::store_failure;
use super::{CartLease, CartPolicy};

#[derive(Debug, Clone)]
pub struct ClearCartCommand {
    pub identity: CartIdentity,
}

/// Deletes the stored cart. Clearing a cart that does not exist succeeds;
/// the next read creates a fresh one.
pub struct ClearCartHandler {
    store: Arc<dyn CartStore>,
    policy: CartPolicy,
}

impl ClearCartHandler {
    pub fn new(store: Arc<dyn CartStore>, policy: CartPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn handle(&self, cmd: ClearCartCommand) -> Result<(), CartError> {
        let owner_id = cmd.identity.id();
        let lease = CartLease::acquire(self.store.clone(), owner_id, self.policy.lock_lease).await?;

        let result = self
            .store
            .delete(owner_id)
            .await
            .map_err(|e| store_failure(owner_id, e));
        lease.release().await;

        result?;
        tracing::info!(owner_id = %owner_id, "cart cleared");
        Ok(())
    }
}
