//! Inventory port.
//!
//! Stock availability queries. Reservation calls are part of the contract for
//! checkout flows; the cart engine itself only reads.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::ProductId;

/// Queries and adjusts stock levels.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Whether `quantity` units can currently be supplied.
    async fn check_availability(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, InventoryError>;

    /// Units currently on hand. Unknown products report 0.
    async fn available_quantity(&self, product_id: &ProductId) -> Result<u32, InventoryError>;

    async fn reserve_stock(&self, product_id: &ProductId, quantity: u32)
        -> Result<(), InventoryError>;

    async fn release_stock(&self, product_id: &ProductId, quantity: u32)
        -> Result<(), InventoryError>;
}

/// Inventory service failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("inventory service unavailable: {0}")]
    Unavailable(String),

    #[error("invalid inventory service response: {0}")]
    InvalidResponse(String),

    #[error("inventory request rejected: {0}")]
    Rejected(String),
}
