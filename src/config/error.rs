//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("JWT secret must be at least {min} bytes in production")]
    JwtSecretTooShort { min: usize },

    #[error("Invalid service URL for {0}")]
    InvalidServiceUrl(&'static str),

    #[error("Cart setting {0} must be greater than zero")]
    NonPositiveCartLimit(&'static str),

    #[error("Guest cart lifetime cannot exceed user cart lifetime")]
    GuestTtlExceedsUserTtl,

    #[error("Cart setting {setting} cannot exceed {max_secs} seconds")]
    CartTtlTooLong {
        setting: &'static str,
        max_secs: u64,
    },

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("{inner} timeout cannot exceed {outer}")]
    TimeoutExceeds {
        inner: &'static str,
        outer: &'static str,
    },
}
