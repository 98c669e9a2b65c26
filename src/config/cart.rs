//! Cart limits and lifetimes

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::CartPolicy;

/// Longest cart lifetime accepted, one year.
pub const MAX_CART_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Cart policy settings
#[derive(Debug, Clone, Deserialize)]
pub struct CartConfig {
    /// Lifetime of an authenticated user's cart, in seconds
    #[serde(default = "default_ttl")]
    pub default_ttl_secs: u64,

    /// Lifetime of a guest cart, in seconds
    #[serde(default = "default_guest_ttl")]
    pub guest_ttl_secs: u64,

    /// Maximum distinct products per cart
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Maximum quantity of a single product
    #[serde(default = "default_max_item_quantity")]
    pub max_item_quantity: u32,

    /// How long a mutation may hold the cart lease, in seconds
    #[serde(default = "default_lock_lease")]
    pub lock_lease_secs: u64,
}

impl CartConfig {
    /// Validate cart settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_ttl_secs == 0 {
            return Err(ValidationError::NonPositiveCartLimit("default_ttl_secs"));
        }
        if self.guest_ttl_secs == 0 {
            return Err(ValidationError::NonPositiveCartLimit("guest_ttl_secs"));
        }
        if self.max_items == 0 {
            return Err(ValidationError::NonPositiveCartLimit("max_items"));
        }
        if self.max_item_quantity == 0 {
            return Err(ValidationError::NonPositiveCartLimit("max_item_quantity"));
        }
        if self.lock_lease_secs == 0 {
            return Err(ValidationError::NonPositiveCartLimit("lock_lease_secs"));
        }
        if self.default_ttl_secs > MAX_CART_TTL_SECS {
            return Err(ValidationError::CartTtlTooLong {
                setting: "default_ttl_secs",
                max_secs: MAX_CART_TTL_SECS,
            });
        }
        if self.guest_ttl_secs > self.default_ttl_secs {
            return Err(ValidationError::GuestTtlExceedsUserTtl);
        }
        Ok(())
    }

    /// Converts into the policy the cart handlers apply. Lifetimes above
    /// [`MAX_CART_TTL_SECS`] are clamped; `validate` rejects them first.
    pub fn to_policy(&self) -> CartPolicy {
        CartPolicy {
            user_ttl: seconds(self.default_ttl_secs),
            guest_ttl: seconds(self.guest_ttl_secs),
            max_items: self.max_items,
            max_quantity: self.max_item_quantity,
            lock_lease: Duration::from_secs(self.lock_lease_secs),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl(),
            guest_ttl_secs: default_guest_ttl(),
            max_items: default_max_items(),
            max_item_quantity: default_max_item_quantity(),
            lock_lease_secs: default_lock_lease(),
        }
    }
}

fn seconds(secs: u64) -> chrono::Duration {
    let secs = secs.min(MAX_CART_TTL_SECS);
    chrono::Duration::seconds(i64::try_from(secs).unwrap_or_default())
}

fn default_ttl() -> u64 {
    30 * 24 * 60 * 60
}

fn default_guest_ttl() -> u64 {
    3 * 24 * 60 * 60
}

fn default_max_items() -> usize {
    100
}

fn default_max_item_quantity() -> u32 {
    10
}

fn default_lock_lease() -> u64 {
    30
}
