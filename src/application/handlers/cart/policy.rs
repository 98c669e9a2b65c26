//! Cart limits, lifetimes, and the inventory check outcome.

use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::domain::cart::IdentityKind;
use crate::ports::InventoryError;

/// Limits and lifetimes applied by every cart handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPolicy {
    /// Lifetime of an authenticated user's cart.
    pub user_ttl: Duration,
    /// Lifetime of a guest cart.
    pub guest_ttl: Duration,
    /// Maximum distinct products per cart.
    pub max_items: usize,
    /// Maximum quantity of a single product.
    pub max_quantity: u32,
    /// How long a mutation may hold the cart lease.
    pub lock_lease: StdDuration,
}

impl CartPolicy {
    /// Default lifetime for carts owned by `kind`.
    pub fn ttl_for(&self, kind: IdentityKind) -> Duration {
        match kind {
            IdentityKind::User => self.user_ttl,
            IdentityKind::Guest => self.guest_ttl,
        }
    }
}

impl Default for CartPolicy {
    fn default() -> Self {
        Self {
            user_ttl: Duration::days(30),
            guest_ttl: Duration::days(3),
            max_items: 100,
            max_quantity: 10,
            lock_lease: StdDuration::from_secs(30),
        }
    }
}

/// Outcome of asking inventory whether a quantity can be supplied.
///
/// `Unknown` means the inventory service failed; add and update proceed
/// anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockCheck {
    Available,
    Unavailable,
    Unknown(String),
}

impl From<Result<bool, InventoryError>> for StockCheck {
    fn from(result: Result<bool, InventoryError>) -> Self {
        match result {
            Ok(true) => StockCheck::Available,
            Ok(false) => StockCheck::Unavailable,
            Err(e) => StockCheck::Unknown(e.to_string()),
        }
    }
}
