//! Transport service - picks and runs the configured transport.

use tracing::info;

use super::TransportConfig;
use crate::core::{McpServer, Result};

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Serve `server` on the configured transport until it shuts down.
    pub async fn run(self, server: McpServer) -> Result<()> {
        info!("Starting transport: {}", self.config.description());

        let served = match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => TcpTransport::new(cfg).run(server).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server).await,
        };

        Ok(served?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, Error};

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_bind_failure_is_transport_error() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let http = super::super::HttpConfig {
            port,
            ..Default::default()
        };
        let result = TransportService::new(TransportConfig::Http(http))
            .run(McpServer::new(Config::default()))
            .await;

        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
