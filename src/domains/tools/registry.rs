//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The list of available tools and their metadata
//! - HTTP dispatch for tool calls (when http feature is enabled)

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::core::config::Config;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

use super::definitions::AuditVehicleSafetyTool;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![AuditVehicleSafetyTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![AuditVehicleSafetyTool::to_tool()]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Handlers may block on network I/O.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            AuditVehicleSafetyTool::NAME => {
                AuditVehicleSafetyTool::http_handler(arguments, self.config.clone())
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
