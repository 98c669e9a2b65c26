//! HTTP inventory service client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ProductId;
use crate::ports::{InventoryError, InventoryService};

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    success: bool,
    available: bool,
}

#[derive(Debug, Deserialize)]
struct QuantityResponse {
    #[serde(default)]
    success: bool,
    data: QuantityData,
}

#[derive(Debug, Deserialize)]
struct QuantityData {
    quantity: i64,
}

#[derive(Debug, Serialize)]
struct StockAdjustment {
    quantity: u32,
}

/// Calls the inventory service under `{base}/api/v1/inventory/{id}`.
#[derive(Debug, Clone)]
pub struct HttpInventoryService {
    base_url: Url,
    client: Client,
}

impl HttpInventoryService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, InventoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InventoryError::Unavailable(format!("failed to build HTTP client: {}", e)))?;

        let base_url: String = base_url.into();
        let base_url = Url::parse(&base_url)
            .map_err(|e| InventoryError::Unavailable(format!("invalid inventory service URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(InventoryError::Unavailable(
                "inventory service URL cannot carry a path".to_string(),
            ));
        }

        Ok(Self { base_url, client })
    }

    /// `{base}/api/v1/inventory/{id}[/{action}]`, the id percent-encoded as
    /// a single segment.
    fn item_url(&self, product_id: &ProductId, action: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v1", "inventory", product_id.as_str()]);
            if let Some(action) = action {
                segments.push(action);
            }
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, InventoryError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                InventoryError::Unavailable("inventory service timed out".to_string())
            } else if e.is_connect() {
                InventoryError::Unavailable(format!("connection failed: {}", e))
            } else {
                InventoryError::Unavailable(e.to_string())
            }
        })
    }

    async fn adjust(
        &self,
        product_id: &ProductId,
        action: &str,
        quantity: u32,
    ) -> Result<(), InventoryError> {
        let url = self.item_url(product_id, Some(action));
        let response = self
            .send(self.client.post(url).json(&StockAdjustment { quantity }))
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        tracing::error!(product_id = %product_id, %status, action, "inventory adjustment failed");
        Err(InventoryError::Rejected(format!(
            "{} returned status {}: {}",
            action, status, body
        )))
    }
}

#[async_trait]
impl InventoryService for HttpInventoryService {
    async fn check_availability(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, InventoryError> {
        let url = self.item_url(product_id, Some("check"));
        let response = self
            .send(self.client.get(url).query(&[("quantity", quantity)]))
            .await
            .map_err(|e| {
                tracing::error!(product_id = %product_id, quantity, error = %e, "inventory check failed");
                e
            })?;

        match response.status() {
            StatusCode::OK => {
                let body: AvailabilityResponse = response
                    .json()
                    .await
                    .map_err(|e| InventoryError::InvalidResponse(e.to_string()))?;
                Ok(body.success && body.available)
            }
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(InventoryError::Unavailable(format!(
                "inventory service returned status {}",
                status
            ))),
        }
    }

    async fn available_quantity(&self, product_id: &ProductId) -> Result<u32, InventoryError> {
        let response = self.send(self.client.get(self.item_url(product_id, None))).await?;

        match response.status() {
            StatusCode::OK => {
                let body: QuantityResponse = response
                    .json()
                    .await
                    .map_err(|e| InventoryError::InvalidResponse(e.to_string()))?;
                if !body.success {
                    return Err(InventoryError::InvalidResponse(
                        "inventory service reported failure".to_string(),
                    ));
                }
                Ok(u32::try_from(body.data.quantity.max(0)).unwrap_or(u32::MAX))
            }
            StatusCode::NOT_FOUND => Ok(0),
            status => Err(InventoryError::Unavailable(format!(
                "inventory service returned status {}",
                status
            ))),
        }
    }

    async fn reserve_stock(&self, product_id: &ProductId, quantity: u32) -> Result<(), InventoryError> {
        self.adjust(product_id, "reserve", quantity).await
    }

    async fn release_stock(&self, product_id: &ProductId, quantity: u32) -> Result<(), InventoryError> {
        self.adjust(product_id, "release", quantity).await
    }
}
