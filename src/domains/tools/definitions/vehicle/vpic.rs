//! Blocking client for the NHTSA vPIC `DecodeVinValues` endpoint.
//!
//! vPIC answers with a flat record per VIN where every value is a string,
//! including numeric ones such as `ModelYear`.

use std::time::Duration;

use reqwest::{StatusCode, Url, blocking::Client};
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument};

use super::error::VinError;
use crate::core::config::VpicConfig;

/// Path segment of the flat-format decode operation.
const DECODE_OPERATION: &str = "DecodeVinValues";

/// Envelope returned by `DecodeVinValues`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DecodeVinResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub search_criteria: String,
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<DecodedVehicle>,
}

/// The subset of a vPIC result record this server consumes.
///
/// Missing or `null` values read as the empty string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DecodedVehicle {
    #[serde(rename = "VIN", deserialize_with = "null_as_default")]
    pub vin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub make: String,
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub model_year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub trim: String,
    #[serde(deserialize_with = "null_as_default")]
    pub series: String,
    #[serde(deserialize_with = "null_as_default")]
    pub body_class: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vehicle_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub drive_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transmission_style: String,
    #[serde(deserialize_with = "null_as_default")]
    pub engine_cylinders: String,
    #[serde(deserialize_with = "null_as_default")]
    pub displacement_l: String,
    #[serde(deserialize_with = "null_as_default")]
    pub engine_configuration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fuel_type_primary: String,
    #[serde(rename = "EngineHP", deserialize_with = "null_as_default")]
    pub engine_hp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub manufacturer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub plant_country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_text: String,
}

impl DecodedVehicle {
    /// vPIC uses `ErrorCode` "0" for a clean decode; anything else is a
    /// partial or failed decode that still carries whatever fields it could
    /// resolve.
    pub fn has_decode_warning(&self) -> bool {
        !self.error_code.is_empty() && self.error_code != "0"
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// vPIC decode client. One instance per tool call.
#[derive(Debug, Clone)]
pub struct VpicClient {
    http: Client,
    base_url: Url,
}

impl VpicClient {
    /// Build a client for `config.base_url` with `config.timeout_secs`.
    pub fn new(config: &VpicConfig) -> Result<Self, VinError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| VinError::endpoint(format!("{}: {}", config.base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(VinError::endpoint(format!(
                "{}: not a hierarchical URL",
                config.base_url
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(VinError::Fetch)?;

        Ok(Self { http, base_url })
    }

    /// Build a client against an arbitrary base URL with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, VinError> {
        Self::new(&VpicConfig {
            base_url: base_url.into(),
            ..VpicConfig::default()
        })
    }

    /// `{base}/DecodeVinValues/{vin}?format=json`, with the VIN pushed as one
    /// percent-encoded path segment.
    pub fn decode_url(&self, vin: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(DECODE_OPERATION).push(vin);
        }
        url.query_pairs_mut().append_pair("format", "json");
        url
    }

    /// Fetch and parse the raw decode response for `vin`.
    #[instrument(skip(self))]
    pub fn decode(&self, vin: &str) -> Result<DecodeVinResponse, VinError> {
        let url = self.decode_url(vin);
        debug!("GET {}", url);

        let response = self.http.get(url).send().map_err(VinError::Fetch)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(VinError::Status(status.as_u16()));
        }

        let body = response.bytes().map_err(VinError::ReadBody)?;
        let decoded: DecodeVinResponse = serde_json::from_slice(&body).map_err(VinError::Parse)?;

        debug!(
            count = decoded.count,
            results = decoded.results.len(),
            "vPIC answered: {}",
            decoded.message
        );
        Ok(decoded)
    }

    /// Fetch the decode for `vin` and keep only its first result.
    pub fn decode_first(&self, vin: &str) -> Result<DecodedVehicle, VinError> {
        self.decode(vin)?
            .results
            .into_iter()
            .next()
            .ok_or(VinError::NoResults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_url_default_base() {
        let client = VpicClient::new(&VpicConfig::default()).unwrap();
        assert_eq!(
            client.decode_url("5UXWX7C50BA").as_str(),
            "https://vpic.nhtsa.dot.gov/api/vehicles/DecodeVinValues/5UXWX7C50BA?format=json"
        );
    }

    #[test]
    fn test_decode_url_trailing_slash_and_encoding() {
        let client = VpicClient::with_base_url("http://127.0.0.1:9000/").unwrap();
        assert_eq!(
            client.decode_url("1HG CM/82633").as_str(),
            "http://127.0.0.1:9000/DecodeVinValues/1HG%20CM%2F82633?format=json"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(
            VpicClient::with_base_url("vpic"),
            Err(VinError::Endpoint(_))
        ));
        assert!(matches!(
            VpicClient::with_base_url("data:text/plain,vpic"),
            Err(VinError::Endpoint(_))
        ));
    }

    #[test]
    fn test_response_tolerates_nulls_and_missing_keys() {
        let body = r#"{
            "Count": 136,
            "Message": "Results returned successfully",
            "SearchCriteria": null,
            "Results": [{"VIN": "5UXWX7C50BA", "Make": "BMW", "Trim": null, "EngineHP": "300", "Unrelated": "x"}]
        }"#;
        let response: DecodeVinResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.count, 136);
        assert_eq!(response.search_criteria, "");
        let first = &response.results[0];
        assert_eq!(first.vin, "5UXWX7C50BA");
        assert_eq!(first.make, "BMW");
        assert_eq!(first.trim, "");
        assert_eq!(first.engine_hp, "300");
        assert_eq!(first.model_year, "");
    }

    #[test]
    fn test_null_results_is_empty() {
        let response: DecodeVinResponse =
            serde_json::from_str(r#"{"Count": 0, "Message": "none", "Results": null}"#).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_decode_warning() {
        let clean = DecodedVehicle {
            error_code: "0".to_string(),
            ..Default::default()
        };
        let partial = DecodedVehicle {
            error_code: "1".to_string(),
            error_text: "1 - Check Digit (9th position) does not calculate properly".to_string(),
            ..Default::default()
        };
        assert!(!clean.has_decode_warning());
        assert!(!DecodedVehicle::default().has_decode_warning());
        assert!(partial.has_decode_warning());
    }
}
