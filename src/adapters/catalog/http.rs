//! HTTP product catalog client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::cart::ProductInfo;
use crate::domain::foundation::ProductId;
use crate::ports::{CatalogError, ProductCatalog};

/// Calls the product service at `GET {base}/api/products/{id}`.
#[derive(Debug, Clone)]
pub struct HttpProductCatalog {
    base_url: Url,
    client: Client,
}

impl HttpProductCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Unavailable(format!("failed to build HTTP client: {}", e)))?;

        let base_url: String = base_url.into();
        let base_url = Url::parse(&base_url)
            .map_err(|e| CatalogError::Unavailable(format!("invalid product service URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Unavailable(
                "product service URL cannot carry a path".to_string(),
            ));
        }

        Ok(Self { base_url, client })
    }

    /// The id is pushed as one percent-encoded path segment.
    fn product_url(&self, product_id: &ProductId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "products", product_id.as_str()]);
        }
        url
    }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
    async fn get_product(&self, product_id: &ProductId) -> Result<ProductInfo, CatalogError> {
        let response = self
            .client
            .get(self.product_url(product_id))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(product_id = %product_id, error = %e, "product service call failed");
                if e.is_timeout() {
                    CatalogError::Unavailable("product service timed out".to_string())
                } else if e.is_connect() {
                    CatalogError::Unavailable(format!("connection failed: {}", e))
                } else {
                    CatalogError::Unavailable(e.to_string())
                }
            })?;

        match response.status() {
            StatusCode::OK => response
                .json::<ProductInfo>()
                .await
                .map_err(|e| CatalogError::InvalidResponse(e.to_string())),
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound(product_id.clone())),
            status => {
                tracing::error!(product_id = %product_id, status = %status, "product service returned error");
                Err(CatalogError::Unavailable(format!(
                    "product service returned status {}",
                    status
                )))
            }
        }
    }
}
