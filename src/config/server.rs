//! HTTP listener settings for the cart API

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest request the cart API will serve. A cart call is one lease, one
/// catalog lookup, one inventory check and one store write.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Listener, logging and browser-access settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Tracing filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whole-request deadline; must fit inside the cart lease
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Storefront origins allowed to call the API, comma-separated.
    /// Unset or `*` allows any origin.
    pub cors_origins: Option<String>,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Browser origins the CORS layer admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parsed CORS setting. Blank entries are skipped.
    pub fn cors(&self) -> CorsOrigins {
        let origins: Vec<String> = self
            .cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        self.validate_cors()
    }

    /// Each explicit origin is `http(s)://host[:port]` with no path, and `*`
    /// cannot be mixed with explicit origins.
    fn validate_cors(&self) -> Result<(), ValidationError> {
        let raw = self.cors_origins.as_deref().unwrap_or_default();
        let entries: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect();

        if entries.len() > 1 && entries.contains(&"*") {
            return Err(ValidationError::InvalidCorsOrigin("*".to_string()));
        }

        for origin in entries.iter().filter(|origin| **origin != "*") {
            let host = origin
                .strip_prefix("https://")
                .or_else(|| origin.strip_prefix("http://"));
            match host {
                Some(host) if !host.is_empty() && !host.contains('/') => {}
                _ => return Err(ValidationError::InvalidCorsOrigin(origin.to_string())),
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8085
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,cart_service=debug,tower_http=debug".to_string()
}

fn default_request_timeout() -> u64 {
    15
}
