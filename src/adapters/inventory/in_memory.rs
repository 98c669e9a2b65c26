//! In-memory inventory for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::ProductId;
use crate::ports::{InventoryError, InventoryService};

/// Stock levels held in a map. Unknown products have no stock.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    stock: RwLock<HashMap<ProductId, u32>>,
    unavailable: AtomicBool,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock(mut self, product_id: ProductId, quantity: u32) -> Self {
        self.stock.get_mut().insert(product_id, quantity);
        self
    }

    pub async fn set_stock(&self, product_id: &ProductId, quantity: u32) {
        self.stock.write().await.insert(product_id.clone(), quantity);
    }

    /// Makes every call fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), InventoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(InventoryError::Unavailable("inventory disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryService for InMemoryInventory {
    async fn check_availability(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, InventoryError> {
        self.check_available()?;
        let on_hand = self.stock.read().await.get(product_id).copied().unwrap_or(0);
        Ok(quantity <= on_hand)
    }

    async fn available_quantity(&self, product_id: &ProductId) -> Result<u32, InventoryError> {
        self.check_available()?;
        Ok(self.stock.read().await.get(product_id).copied().unwrap_or(0))
    }

    async fn reserve_stock(&self, product_id: &ProductId, quantity: u32) -> Result<(), InventoryError> {
        self.check_available()?;
        let mut stock = self.stock.write().await;
        let on_hand = stock.entry(product_id.clone()).or_insert(0);
        if *on_hand < quantity {
            return Err(InventoryError::Rejected(format!(
                "only {} of {} on hand",
                on_hand, product_id
            )));
        }
        *on_hand -= quantity;
        Ok(())
    }

    async fn release_stock(&self, product_id: &ProductId, quantity: u32) -> Result<(), InventoryError> {
        self.check_available()?;
        let mut stock = self.stock.write().await;
        *stock.entry(product_id.clone()).or_insert(0) += quantity;
        Ok(())
    }
}
