//! Product catalog port.
//!
//! Read-only lookups of current product data used to populate and
//! reconcile cart lines.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::cart::ProductInfo;
use crate::domain::foundation::ProductId;

/// Looks up current product data.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_product(&self, product_id: &ProductId) -> Result<ProductInfo, CatalogError>;
}

/// Catalog lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("product not found: {0}")]
    NotFound(ProductId),

    #[error("product service unavailable: {0}")]
    Unavailable(String),

    #[error("invalid product service response: {0}")]
    InvalidResponse(String),
}
