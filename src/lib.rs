//! VIN Car MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing one tool,
//! `audit_vehicle_safety`, which decodes a US VIN through the NHTSA vPIC
//! API and returns a normalized JSON vehicle specification.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the rmcp server handler and
//!   the stdio/tcp/http transports
//! - **domains::tools**: tool definitions, router and registry
//!
//! # Example
//!
//! ```rust,no_run
//! use vin_mcp_server::{core::Config, core::McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
