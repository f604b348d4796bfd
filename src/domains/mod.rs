//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes a single domain: MCP tools.

pub mod tools;
