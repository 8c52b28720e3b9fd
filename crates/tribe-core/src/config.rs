//! Core configuration module.
//!
//! Supports configuration via environment variables:
//!
//! ```bash
//! # Required: token signing secret, at least 32 characters
//! TRIBE_JWT_SECRET=...
//!
//! # Optional: activity queue capacity (default 1024)
//! TRIBE_QUEUE_CAPACITY=4096
//! ```

use std::env;
use thiserror::Error;

const DEFAULT_QUEUE_CAPACITY: usize = 1024;
const MIN_SECRET_LEN: usize = 32;

/// Core configuration
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Process-wide token signing secret. Immutable after start.
    pub jwt_secret: String,
    /// Bound for the in-process activity queue.
    pub queue_capacity: usize,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("TRIBE_JWT_SECRET must be at least 32 characters")]
    WeakSecret,

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl CoreConfig {
    /// Build a configuration with an explicit secret (tests, embedding).
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret);
        }
        Ok(Self {
            jwt_secret,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("TRIBE_JWT_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("TRIBE_JWT_SECRET".to_string()))?;

        let mut config = Self::new(jwt_secret)?;

        if let Ok(raw) = env::var("TRIBE_QUEUE_CAPACITY") {
            config.queue_capacity = raw.parse().map_err(|_| {
                ConfigError::InvalidValue("TRIBE_QUEUE_CAPACITY".to_string(), raw.clone())
            })?;
        }

        Ok(config)
    }
}
