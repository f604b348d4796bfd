//! Tool definitions module.
//!
//! This module exports all available tool definitions.

pub mod common;
pub mod vehicle;

pub use vehicle::{AuditVehicleParams, AuditVehicleSafetyTool};
