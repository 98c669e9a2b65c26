//! Downstream service endpoints

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Product catalog and inventory service locations
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the product catalog
    pub product_service_url: String,

    /// Base URL of the inventory service
    pub inventory_service_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ServicesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate service URLs
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_url(&self.product_service_url, "PRODUCT_SERVICE_URL")?;
        check_url(&self.inventory_service_url, "INVENTORY_SERVICE_URL")?;
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn check_url(url: &str, name: &'static str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::MissingRequired(name));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidServiceUrl(name));
    }
    Ok(())
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            product_service_url: String::new(),
            inventory_service_url: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
