//! API configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first, if present.
//!
//! # Environment Variables
//! - `MINIMART_HOST` - Bind address (default: 0.0.0.0)
//! - `MINIMART_PORT` - Listen port (default: 8080)
//! - `MINIMART_LOG_FORMAT` - `json` or `pretty` (default: json)
//! - `RUST_LOG` - tracing filter (default: info)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use minimart_observability::LogFormat;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup("MINIMART_HOST") {
            Some(raw) => raw
                .parse()
                .map_err(|e| invalid("MINIMART_HOST", e))?,
            None => defaults.host,
        };
        let port = match lookup("MINIMART_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| invalid("MINIMART_PORT", e))?,
            None => defaults.port,
        };
        let log_format = match lookup("MINIMART_LOG_FORMAT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| invalid("MINIMART_LOG_FORMAT", e))?,
            None => defaults.log_format,
        };

        Ok(Self {
            host,
            port,
            log_format,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn invalid(key: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}
