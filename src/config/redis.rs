//! Cart store connection settings

use ::redis::IntoConnectionInfo;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Redis holding cart documents and cart leases
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// `redis://`, `rediss://` (TLS) or `redis+unix://` URL
    pub url: String,

    /// Deadline for a single store command; must be shorter than the lease
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RedisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether the connection is encrypted.
    pub fn uses_tls(&self) -> bool {
        self.url.starts_with("rediss://")
    }

    /// The URL is checked with the same parser the client connects with, so
    /// an unknown scheme or a non-numeric database fails here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("REDIS_URL"));
        }
        if self.url.as_str().into_connection_info().is_err() {
            return Err(ValidationError::InvalidRedisUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    2
}
