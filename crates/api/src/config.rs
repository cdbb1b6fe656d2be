//! Process configuration, resolved once at startup.
//!
//! Nothing here is re-read per request; the resolved struct is passed
//! explicitly into the token service and store initialization.

use std::env;

/// Which persistence backend to run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory stores (dev/test).
    Memory,
    /// Postgres-backed stores (requires the `postgres` cargo feature).
    Postgres { database_url: String },
}

/// Immutable startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// REST API bind address.
    pub api_addr: String,

    /// Notification channel bind address (second listener).
    pub notify_addr: String,

    /// Token signing secret.
    pub jwt_secret: String,

    /// Bearer token lifetime in seconds.
    pub token_ttl_secs: i64,

    /// Persistence backend selection.
    pub store_backend: StoreBackend,
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    MissingRequired(&'static str),

    #[error("invalid value for {0}")]
    InvalidValue(&'static str),
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fatal on a missing signing secret, and on a missing connection string
    /// when the Postgres backend is selected.
    pub fn load() -> Result<Self, ConfigError> {
        let api_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let notify_port: u16 = env::var("NOTIFY_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("NOTIFY_PORT"))?;

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingRequired("JWT_SECRET"))?;

        let token_ttl_secs: i64 = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string()) // 1 hour
            .parse()
            .map_err(|_| ConfigError::InvalidValue("TOKEN_TTL_SECS"))?;

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingRequired("DATABASE_URL"))?,
            },
            _ => return Err(ConfigError::InvalidValue("STORE_BACKEND")),
        };

        Ok(Self {
            api_addr: format!("0.0.0.0:{api_port}"),
            notify_addr: format!("0.0.0.0:{notify_port}"),
            jwt_secret,
            token_ttl_secs,
            store_backend,
        })
    }
}
