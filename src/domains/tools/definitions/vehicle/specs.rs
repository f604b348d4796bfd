//! Normalized vehicle specification returned to MCP clients.

use std::num::IntErrorKind;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::VinError;
use super::vpic::DecodedVehicle;

/// Flattened view of the first vPIC result.
///
/// Field order here is the field order of the JSON returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VehicleSpecs {
    pub vin: String,
    /// Model year; 0 when vPIC did not report a numeric year.
    pub year: i64,
    pub make: String,
    pub model: String,
    pub trim: String,
    pub series: String,
    pub body_class: String,
    pub vehicle_type: String,
    pub drive_type: String,
    pub transmission: String,
    pub engine: EngineSpecs,
    pub manufacturer: String,
    pub plant_country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EngineSpecs {
    pub cylinders: String,
    pub displacement_l: String,
    pub configuration: String,
    pub fuel_type: String,
    pub horsepower: String,
}

/// Parse vPIC's textual model year.
///
/// Anything that is not an integer is 0. Integers outside the `i64` range
/// saturate instead.
pub fn parse_model_year(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(year) => year,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

impl From<DecodedVehicle> for VehicleSpecs {
    fn from(raw: DecodedVehicle) -> Self {
        Self {
            year: parse_model_year(&raw.model_year),
            vin: raw.vin,
            make: raw.make,
            model: raw.model,
            trim: raw.trim,
            series: raw.series,
            body_class: raw.body_class,
            vehicle_type: raw.vehicle_type,
            drive_type: raw.drive_type,
            transmission: raw.transmission_style,
            engine: EngineSpecs {
                cylinders: raw.engine_cylinders,
                displacement_l: raw.displacement_l,
                configuration: raw.engine_configuration,
                fuel_type: raw.fuel_type_primary,
                horsepower: raw.engine_hp,
            },
            manufacturer: raw.manufacturer,
            plant_country: raw.plant_country,
        }
    }
}

impl VehicleSpecs {
    /// Two-space indented JSON, as sent in the tool result text.
    pub fn to_pretty_json(&self) -> Result<String, VinError> {
        serde_json::to_string_pretty(self).map_err(VinError::Encode)
    }
}
