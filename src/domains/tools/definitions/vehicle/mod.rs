//! Vehicle tools backed by the NHTSA vPIC API.
//!
//! - `audit`: the `audit_vehicle_safety` MCP tool
//! - `vpic`: blocking vPIC client and raw response types
//! - `specs`: normalized output record
//! - `error`: decode failure taxonomy

pub mod audit;
pub mod error;
pub mod specs;
pub mod vpic;

pub use audit::{AuditVehicleParams, AuditVehicleSafetyTool};
pub use error::VinError;
pub use specs::{EngineSpecs, VehicleSpecs};
pub use vpic::{DecodeVinResponse, DecodedVehicle, VpicClient};
