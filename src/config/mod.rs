//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CART_SERVICE_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use cart_service::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod auth;
mod cart;
mod error;
mod redis;
mod server;
mod services;

pub use auth::AuthConfig;
pub use cart::CartConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::{CorsOrigins, Environment, ServerConfig};
pub use services::ServicesConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Redis configuration (cart store)
    pub redis: RedisConfig,

    /// Bearer token verification
    pub auth: AuthConfig,

    /// Cart limits and lifetimes
    #[serde(default)]
    pub cart: CartConfig,

    /// Product catalog and inventory endpoints
    pub services: ServicesConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CART_SERVICE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CART_SERVICE__SERVER__PORT=8085` -> `server.port = 8085`
    /// - `CART_SERVICE__REDIS__URL=...` -> `redis.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CART_SERVICE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.redis.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.cart.validate()?;
        self.services.validate()?;
        self.validate_timeouts()
    }

    /// Downstream calls fit inside a request, and a request and each store
    /// command fit inside the cart lease it holds.
    fn validate_timeouts(&self) -> Result<(), ValidationError> {
        let request = self.server.request_timeout_secs;
        let lease = self.cart.lock_lease_secs;

        if self.services.timeout_secs > request {
            return Err(ValidationError::TimeoutExceeds {
                inner: "downstream service",
                outer: "the request timeout",
            });
        }
        if request > lease {
            return Err(ValidationError::TimeoutExceeds {
                inner: "request",
                outer: "the cart lease",
            });
        }
        if self.redis.timeout_secs >= lease {
            return Err(ValidationError::TimeoutExceeds {
                inner: "store command",
                outer: "the cart lease",
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
