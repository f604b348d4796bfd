//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/`. Each tool defines:
//! - Parameters struct (for the advertised input schema)
//! - `call()` method (argument validation and core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built in `domains/tools/router.rs`, so adding a tool
//! does not touch this file.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

#[cfg(feature = "http")]
use tracing::debug;

use super::config::Config;
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use super::error::Error;
#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Instructions returned to clients during initialization.
pub const INSTRUCTIONS: &str = "Vehicle decoding server. Call `audit_vehicle_safety` with a \
     17-character US VIN to receive the decoded vehicle specification as JSON.";

/// The main MCP server handler.
///
/// Implements `ServerHandler` from rmcp; tool calls are routed through the
/// dynamically built `ToolRouter`.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        Self {
            tool_router: build_tool_router::<Self>(config.clone()),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Tool handlers perform blocking network I/O, so dispatch happens on
    /// tokio's blocking pool.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> super::error::Result<serde_json::Value> {
        debug!("Dispatching HTTP tool call: {}", name);

        let registry = ToolRegistry::new(self.config.clone());
        let name = name.to_string();

        let response = tokio::task::spawn_blocking(move || registry.call_tool(&name, arguments))
            .await
            .map_err(|e| Error::internal(format!("tool task failed: {}", e)))??;

        Ok(response)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_advertises_tools_only() {
        let server = McpServer::new(Config::default());
        let info = server.get_info();

        assert_eq!(info.server_info.name, "vin-car-mcp");
        assert_eq!(info.server_info.version, "1.0.0");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_list_tools() {
        let server = McpServer::new(Config::default());
        let tools = server.list_tools();

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "audit_vehicle_safety");
        assert_eq!(tools[0]["inputSchema"]["required"][0], "vin");
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_unknown_tool() {
        let server = McpServer::new(Config::default());
        let result = server.call_tool("decode_everything", serde_json::json!({})).await;
        assert!(matches!(result, Err(Error::Tool(_))));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool_without_vin_is_tool_error_result() {
        let server = McpServer::new(Config::default());
        let result = server
            .call_tool("audit_vehicle_safety", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(result["isError"], true);
    }
}
