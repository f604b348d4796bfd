//! Tools domain module.
//!
//! Tools are executable functions that MCP clients call by name.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create the tool under `definitions/` with `to_tool()`, `create_route()`
//!    and `http_handler()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs`
//! 4. Register it in `registry.rs` for HTTP support

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
