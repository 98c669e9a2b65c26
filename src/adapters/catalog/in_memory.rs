//! In-memory product catalog for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::cart::ProductInfo;
use crate::domain::foundation::ProductId;
use crate::ports::{CatalogError, ProductCatalog};

#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<HashMap<ProductId, ProductInfo>>,
    unavailable: AtomicBool,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product: ProductInfo) -> Self {
        self.products.get_mut().insert(product.id.clone(), product);
        self
    }

    pub async fn upsert(&self, product: ProductInfo) {
        self.products.write().await.insert(product.id.clone(), product);
    }

    pub async fn set_price(&self, product_id: &ProductId, price: Decimal) {
        if let Some(product) = self.products.write().await.get_mut(product_id) {
            product.price = price;
        }
    }

    pub async fn set_active(&self, product_id: &ProductId, active: bool) {
        if let Some(product) = self.products.write().await.get_mut(product_id) {
            product.is_active = active;
        }
    }

    pub async fn remove(&self, product_id: &ProductId) {
        self.products.write().await.remove(product_id);
    }

    /// Makes every lookup fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn get_product(&self, product_id: &ProductId) -> Result<ProductInfo, CatalogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("catalog disabled".to_string()));
        }
        self.products
            .read()
            .await
            .get(product_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(product_id.clone()))
    }
}
