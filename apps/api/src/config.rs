//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                     | Default   |
//! |------------------------------|-----------|
//! | `TIENDA_HOST`                | `0.0.0.0` |
//! | `TIENDA_PORT`                | `8080`    |
//! | `TIENDA_SEED_DEMO`           | `false`   |
//! | `TIENDA_REPORT_TOP_LIMIT`    | `10`      |
//! | `TIENDA_LOW_STOCK_THRESHOLD` | `5`       |

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: IpAddr,

    /// HTTP port
    pub port: u16,

    /// Insert the demo catalog at startup
    pub seed_demo: bool,

    /// Default length of the top-products list in `/reports/sales`
    pub report_top_limit: usize,

    /// Default threshold for `/reports/low-stock`
    pub low_stock_threshold: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            seed_demo: false,
            report_top_limit: 10,
            low_stock_threshold: 5,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            host: parse_or(&lookup, "TIENDA_HOST", defaults.host)?,
            port: parse_or(&lookup, "TIENDA_PORT", defaults.port)?,
            seed_demo: parse_or(&lookup, "TIENDA_SEED_DEMO", defaults.seed_demo)?,
            report_top_limit: parse_or(&lookup, "TIENDA_REPORT_TOP_LIMIT", defaults.report_top_limit)?,
            low_stock_threshold: parse_or(
                &lookup,
                "TIENDA_LOW_STOCK_THRESHOLD",
                defaults.low_stock_threshold,
            )?,
        };

        if config.low_stock_threshold < 0 {
            return Err(ConfigError::InvalidValue(
                "TIENDA_LOW_STOCK_THRESHOLD".to_string(),
            ));
        }

        Ok(config)
    }

    /// Address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
