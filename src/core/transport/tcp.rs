//! TCP transport implementation.
//!
//! Line-delimited JSON-RPC over raw TCP sockets, one MCP session per
//! accepted connection.

use std::net::SocketAddr;
use std::time::Duration;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Pause after a failed `accept` before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Accept connections forever, spawning a session task for each.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.bind_address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            if let Err(e) = stream.set_nodelay(true) {
                warn!("Failed to set TCP_NODELAY for {}: {}", peer, e);
            }

            tokio::spawn(serve_connection(server.clone(), stream, peer));
        }
    }
}

#[instrument(skip(server, stream))]
async fn serve_connection(server: McpServer, stream: TcpStream, peer: SocketAddr) {
    let service = match server.serve(stream).await {
        Ok(service) => service,
        Err(e) => {
            warn!("MCP handshake failed: {}", e);
            return;
        }
    };

    info!("Client connected");

    match service.waiting().await {
        Ok(reason) => info!("Client disconnected: {:?}", reason),
        Err(e) => warn!("Session ended with error: {}", e),
    }
}
