//! Failure modes of a VIN decode.

use thiserror::Error;

/// Everything that can stop `audit_vehicle_safety` from producing specs.
///
/// The `Display` text is what the caller sees in the error-flagged tool
/// result.
#[derive(Debug, Error)]
pub enum VinError {
    #[error("required argument \"vin\" not found")]
    MissingVin,

    #[error("argument \"vin\" is not a string")]
    VinNotString,

    #[error("argument \"vin\" must not be empty")]
    EmptyVin,

    /// The configured provider base URL cannot carry a decode path.
    #[error("invalid provider endpoint: {0}")]
    Endpoint(String),

    /// Connection failure, timeout, or client construction failure.
    #[error("failed to fetch VIN data: {0}")]
    Fetch(#[source] reqwest::Error),

    /// The provider answered with something other than 200 OK.
    #[error("API returned status {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("failed to parse API response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("no results found for this VIN")]
    NoResults,

    #[error("failed to encode vehicle specs: {0}")]
    Encode(#[source] serde_json::Error),
}

impl VinError {
    /// Create an endpoint configuration error.
    pub fn endpoint(msg: impl Into<String>) -> Self {
        Self::Endpoint(msg.into())
    }

    /// True for errors caused by the caller's arguments rather than the provider.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::MissingVin | Self::VinNotString | Self::EmptyVin)
    }
}
