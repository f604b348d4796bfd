//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default base URL of the NHTSA vPIC vehicles API.
pub const DEFAULT_VPIC_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";

/// Default timeout for a single vPIC request, in seconds.
pub const DEFAULT_VPIC_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Vehicle data provider configuration.
    pub vpic: VpicConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the NHTSA vPIC decode API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpicConfig {
    /// Base URL the `DecodeVinValues` path is appended to.
    pub base_url: String,

    /// Client-side timeout for one decode request, in seconds.
    pub timeout_secs: u64,
}

impl Default for VpicConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_VPIC_BASE_URL.to_string(),
            timeout_secs: DEFAULT_VPIC_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "vin-car-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            vpic: VpicConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Load logging settings from `MCP_LOG_LEVEL` and `MCP_LOG_TIMESTAMPS`.
    ///
    /// Reads nothing else, so the subscriber can be installed before the
    /// rest of the configuration logs its warnings.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        logging
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_VPIC_BASE_URL`.
    /// Invalid values are replaced by defaults with a warning, so install the
    /// tracing subscriber (see [`LoggingConfig::from_env`]) first.
    pub fn from_env() -> Self {
        let mut config = Self {
            logging: LoggingConfig::from_env(),
            ..Self::default()
        };

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_VPIC_BASE_URL") {
            info!("vPIC base URL overridden: {}", base_url);
            config.vpic.base_url = base_url;
        }

        if let Ok(raw) = std::env::var("MCP_VPIC_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.vpic.timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid MCP_VPIC_TIMEOUT_SECS={:?}, using {}s",
                    raw, DEFAULT_VPIC_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    /// Check the values that cannot be repaired with a default.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.vpic.base_url)
            .map_err(|e| Error::config(format!("invalid vPIC base URL '{}': {}", self.vpic.base_url, e)))?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "vPIC base URL must be an http(s) URL: {}",
                self.vpic.base_url
            )));
        }

        if self.vpic.timeout_secs == 0 {
            return Err(Error::config("vPIC timeout must be at least one second"));
        }

        match &self.transport {
            #[cfg(feature = "http")]
            TransportConfig::Http(http) if !http.rpc_path.starts_with('/') => {
                return Err(Error::config(format!(
                    "HTTP RPC path must start with '/': {:?}",
                    http.rpc_path
                )));
            }
            _ => {}
        }

        Ok(())
    }
}
