//! TransferCartHandler - Command handler for merging a guest cart into a
//! user's cart after sign-in.

use std::sync::Arc;

use crate::domain::cart::{Cart, CartError, CartIdentity};
use crate::domain::foundation::OwnerId;
use crate::ports::CartStore;

use super::get_cart::get_or_create;
use super::shared::{load_live_cart, load_or_new, store_failure};
use super::{CartLease, CartPolicy};

/// Command to move every line of a guest cart into a user cart.
#[derive(Debug, Clone)]
pub struct TransferCartCommand {
    pub guest_id: OwnerId,
    pub user_id: OwnerId,
}

/// Merges the source cart into the target and deletes the source.
///
/// Lines that would break the target's limits are skipped. Leases are taken
/// source first, then target.
pub struct TransferCartHandler {
    store: Arc<dyn CartStore>,
    policy: CartPolicy,
}

impl TransferCartHandler {
    pub fn new(store: Arc<dyn CartStore>, policy: CartPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn handle(&self, cmd: TransferCartCommand) -> Result<Cart, CartError> {
        if cmd.guest_id == cmd.user_id {
            return Err(CartError::invalid_identity(
                "cannot transfer a cart onto itself",
            ));
        }

        tracing::debug!(guest_id = %cmd.guest_id, user_id = %cmd.user_id, "transferring cart");

        // 1. Lock source, then target
        let source_lease =
            CartLease::acquire(self.store.clone(), &cmd.guest_id, self.policy.lock_lease).await?;
        let target_lease =
            match CartLease::acquire(self.store.clone(), &cmd.user_id, self.policy.lock_lease)
                .await
            {
                Ok(lease) => lease,
                Err(e) => {
                    source_lease.release().await;
                    return Err(e);
                }
            };

        let result = self.apply(&cmd).await;

        target_lease.release().await;
        source_lease.release().await;
        result
    }

    async fn apply(&self, cmd: &TransferCartCommand) -> Result<Cart, CartError> {
        let target_identity = CartIdentity::user(cmd.user_id.clone());

        // 2. Nothing to move: behave like a read of the target
        let Some(source) = load_live_cart(self.store.as_ref(), &cmd.guest_id).await? else {
            return get_or_create(self.store.as_ref(), &target_identity, &self.policy).await;
        };

        // 3. Merge line by line, skipping lines the target cannot take
        let (mut target, _) =
            load_or_new(self.store.as_ref(), &target_identity, &self.policy).await?;
        let mut moved = 0usize;
        for item in source.items() {
            match target.add_item(item.clone(), self.policy.max_items, self.policy.max_quantity) {
                Ok(()) => moved += 1,
                Err(e) => tracing::warn!(
                    guest_id = %cmd.guest_id,
                    user_id = %cmd.user_id,
                    product_id = %item.product_id(),
                    error = %e,
                    "skipping item during cart transfer"
                ),
            }
        }
        target.extend_expiry(self.policy.user_ttl);

        // 4. Persist target, then drop source
        self.store
            .save(&target)
            .await
            .map_err(|e| store_failure(&cmd.user_id, e))?;

        if let Err(e) = self.store.delete(&cmd.guest_id).await {
            tracing::warn!(guest_id = %cmd.guest_id, error = %e, "failed to delete guest cart after transfer");
        }

        tracing::info!(
            guest_id = %cmd.guest_id,
            user_id = %cmd.user_id,
            moved,
            skipped = source.items().len() - moved,
            "cart transferred"
        );
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::cart::CartItem;
    use chrono::Duration;

    fn transfer(guest: &str, user: &str) -> TransferCartCommand {
        TransferCartCommand {
            guest_id: OwnerId::new(guest).unwrap(),
            user_id: OwnerId::new(user).unwrap(),
        }
    }

    async fn seed(f: &Fixture, owner: &str, lines: &[(&str, &str, u32)]) {
        let mut cart = Cart::new(OwnerId::new(owner).unwrap(), Duration::days(1));
        for (product, price, quantity) in lines {
            cart.add_item(CartItem::new(pid(product), dec(price), *quantity), 100, 10)
                .unwrap();
        }
        f.store.save(&cart).await.unwrap();
    }

    #[tokio::test]
    async fn merges_lines_and_drains_source() {
        let f = Fixture::new();
        seed(&f, "g-1", &[("prod-1", "10.99", 2), ("prod-2", "5.00", 1)]).await;
        seed(&f, "u-1", &[("prod-1", "10.99", 1)]).await;
        let handler = TransferCartHandler::new(f.store.clone(), f.policy.clone());

        let cart = handler.handle(transfer("g-1", "u-1")).await.unwrap();

        assert_eq!(cart.get_item(&pid("prod-1")).unwrap().quantity(), 3);
        assert_eq!(cart.get_item(&pid("prod-2")).unwrap().quantity(), 1);
        assert_eq!(cart.total_price(), dec("37.97"));
        assert!(!f.store.exists(&OwnerId::new("g-1").unwrap()).await.unwrap());
        assert!(cart.remaining_lifetime() > Duration::days(29));
    }

    #[tokio::test]
    async fn lines_that_break_limits_are_skipped() {
        let f = Fixture::new();
        seed(&f, "g-1", &[("prod-1", "10.99", 8), ("prod-2", "5.00", 1)]).await;
        seed(&f, "u-1", &[("prod-1", "10.99", 5)]).await;
        let handler = TransferCartHandler::new(f.store.clone(), f.policy.clone());

        let cart = handler.handle(transfer("g-1", "u-1")).await.unwrap();

        assert_eq!(cart.get_item(&pid("prod-1")).unwrap().quantity(), 5);
        assert_eq!(cart.get_item(&pid("prod-2")).unwrap().quantity(), 1);
    }

    #[tokio::test]
    async fn missing_source_returns_target() {
        let f = Fixture::new();
        let handler = TransferCartHandler::new(f.store.clone(), f.policy.clone());

        let cart = handler.handle(transfer("g-1", "u-1")).await.unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.owner_id().as_str(), "u-1");
        assert!(f.store.exists(&OwnerId::new("u-1").unwrap()).await.unwrap());
    }

    #[tokio::test]
    async fn self_transfer_is_rejected() {
        let f = Fixture::new();
        let handler = TransferCartHandler::new(f.store.clone(), f.policy.clone());

        let result = handler.handle(transfer("same", "same")).await;

        assert!(matches!(result, Err(CartError::InvalidIdentity(_))));
    }

    #[tokio::test]
    async fn locked_target_releases_source_lease() {
        let f = Fixture::new();
        let user_id = OwnerId::new("u-1").unwrap();
        let guest_id = OwnerId::new("g-1").unwrap();
        f.store.acquire_lock(&user_id, f.policy.lock_lease).await.unwrap();
        let handler = TransferCartHandler::new(f.store.clone(), f.policy.clone());

        let result = handler.handle(transfer("g-1", "u-1")).await;

        assert!(matches!(result, Err(CartError::ConcurrentModification(id)) if id == user_id));
        assert!(f.store.acquire_lock(&guest_id, f.policy.lock_lease).await.unwrap());
    }
}
