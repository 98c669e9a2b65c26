//! Per-owner cart lease.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::cart::CartError;
use crate::domain::foundation::OwnerId;
use crate::ports::CartStore;

/// Exclusive right to mutate one owner's cart.
///
/// Call [`CartLease::release`] when the work is done. If the guard is dropped
/// without being released (the request future was cancelled), a release is
/// spawned on the current runtime; failing that, the lease runs out on its own.
pub struct CartLease {
    store: Arc<dyn CartStore>,
    owner_id: OwnerId,
    released: bool,
}

impl CartLease {
    /// Takes the lease or fails with `ConcurrentModification`.
    pub async fn acquire(
        store: Arc<dyn CartStore>,
        owner_id: &OwnerId,
        lease: Duration,
    ) -> Result<Self, CartError> {
        let acquired = store.acquire_lock(owner_id, lease).await.map_err(|e| {
            tracing::error!(owner_id = %owner_id, error = %e, "failed to acquire cart lock");
            CartError::from(e)
        })?;

        if !acquired {
            tracing::debug!(owner_id = %owner_id, "cart lock held by another request");
            return Err(CartError::concurrent_modification(owner_id.clone()));
        }

        tracing::debug!(owner_id = %owner_id, "cart lock acquired");
        Ok(Self {
            store,
            owner_id: owner_id.clone(),
            released: false,
        })
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Gives the lease back. Failures are logged; the lease then expires.
    ///
    /// If this future is dropped before the store answers, the drop guard
    /// still releases the lease.
    pub async fn release(mut self) {
        let outcome = self.store.release_lock(&self.owner_id).await;
        self.released = true;
        match outcome {
            Ok(()) => tracing::debug!(owner_id = %self.owner_id, "cart lock released"),
            Err(e) => {
                tracing::warn!(owner_id = %self.owner_id, error = %e, "failed to release cart lock")
            }
        }
    }
}

impl Drop for CartLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let store = Arc::clone(&self.store);
        let owner_id = self.owner_id.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = store.release_lock(&owner_id).await {
                        tracing::warn!(owner_id = %owner_id, error = %e, "failed to release abandoned cart lock");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(owner_id = %owner_id, "no runtime to release cart lock; waiting for lease expiry");
            }
        }
    }
}

impl std::fmt::Debug for CartLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartLease")
            .field("owner_id", &self.owner_id)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}
