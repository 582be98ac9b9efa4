use std::net::SocketAddr;
use thiserror::Error;

/// Environment variable holding the listen address.
pub const ADDR_ENV: &str = "RATING_GATEWAY_ADDR";

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {var}: {value}")]
    InvalidAddr { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let listen_addr = raw.trim().parse().map_err(|_| ConfigError::InvalidAddr {
            var: ADDR_ENV,
            value: raw.clone(),
        })?;
        Ok(Self { listen_addr })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}
