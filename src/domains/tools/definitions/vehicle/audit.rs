//! `audit_vehicle_safety` tool.
//!
//! Decodes a US VIN through NHTSA vPIC and answers with the normalized
//! [`VehicleSpecs`] as indented JSON text. Every failure, including bad
//! arguments, comes back as an error-flagged tool result so clients can show
//! the message instead of seeing a protocol fault.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::config::{Config, VpicConfig};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

use super::super::common::{error_result, success_result};
#[cfg(feature = "http")]
use super::super::common::to_http_response;
use super::error::VinError;
use super::specs::VehicleSpecs;
use super::vpic::VpicClient;

/// Parameters for `audit_vehicle_safety`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AuditVehicleParams {
    #[schemars(description = "The VIN of the vehicle to audit")]
    pub vin: String,
}

/// VIN audit tool implementation.
#[derive(Debug, Clone, Default)]
pub struct AuditVehicleSafetyTool;

impl AuditVehicleSafetyTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "audit_vehicle_safety";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Audits a US vehicle VIN for specs and active vehicle recalls";

    /// Validate the raw argument map.
    ///
    /// The VIN itself is not checked beyond being a non-empty string; vPIC
    /// decides what it can decode.
    pub fn parse_arguments(arguments: &JsonObject) -> Result<AuditVehicleParams, VinError> {
        match arguments.get("vin") {
            None => Err(VinError::MissingVin),
            Some(serde_json::Value::String(vin)) if vin.is_empty() => Err(VinError::EmptyVin),
            Some(serde_json::Value::String(vin)) => Ok(AuditVehicleParams { vin: vin.clone() }),
            Some(_) => Err(VinError::VinNotString),
        }
    }

    /// Fetch and normalize the specs for `params.vin`.
    ///
    /// Blocks for at most the configured vPIC timeout.
    pub fn decode(params: &AuditVehicleParams, vpic: &VpicConfig) -> Result<VehicleSpecs, VinError> {
        let client = VpicClient::new(vpic)?;
        let raw = client.decode_first(&params.vin)?;

        if raw.has_decode_warning() {
            warn!(
                vin = %params.vin,
                error_code = %raw.error_code,
                "vPIC reported a partial decode: {}",
                raw.error_text
            );
        }

        Ok(VehicleSpecs::from(raw))
    }

    /// Execute the tool for already validated parameters.
    pub fn execute(params: &AuditVehicleParams, config: &Config) -> CallToolResult {
        info!("Auditing VIN {}", params.vin);

        match Self::decode(params, &config.vpic).and_then(|specs| specs.to_pretty_json()) {
            Ok(json) => success_result(json),
            Err(e) => error_result(&e.to_string()),
        }
    }

    /// Validate `arguments` and execute. Shared by every transport.
    pub fn call(arguments: &JsonObject, config: &Config) -> CallToolResult {
        match Self::parse_arguments(arguments) {
            Ok(params) => Self::execute(&params, config),
            Err(e) => {
                debug!(invalid_input = e.is_invalid_input(), "Rejected tool arguments");
                error_result(&e.to_string())
            }
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    ///
    /// Runs on the caller's thread; the HTTP transport dispatches it on the
    /// blocking pool.
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, ToolError> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "expected an object, got {}",
                    other
                )));
            }
        };

        to_http_response(Self::call(&arguments, &config))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AuditVehicleParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let arguments = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                // reqwest::blocking must stay off the async worker threads.
                tokio::task::spawn_blocking(move || Self::call(&arguments, &config))
                    .await
                    .map_err(|e| McpError::internal_error(format!("VIN audit task failed: {}", e), None))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn args(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_arguments() {
        let params =
            AuditVehicleSafetyTool::parse_arguments(&args(serde_json::json!({"vin": "5UXWX7C50BA"})))
                .unwrap();
        assert_eq!(params.vin, "5UXWX7C50BA");

        assert!(matches!(
            AuditVehicleSafetyTool::parse_arguments(&JsonObject::new()),
            Err(VinError::MissingVin)
        ));
        assert!(matches!(
            AuditVehicleSafetyTool::parse_arguments(&args(serde_json::json!({"vin": 12345}))),
            Err(VinError::VinNotString)
        ));
        assert!(matches!(
            AuditVehicleSafetyTool::parse_arguments(&args(serde_json::json!({"vin": null}))),
            Err(VinError::VinNotString)
        ));
        assert!(matches!(
            AuditVehicleSafetyTool::parse_arguments(&args(serde_json::json!({"vin": ""}))),
            Err(VinError::EmptyVin)
        ));
    }

    #[test]
    fn test_missing_vin_is_error_result() {
        let result = AuditVehicleSafetyTool::call(&JsonObject::new(), &Config::default());
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "required argument \"vin\" not found");
    }

    #[test]
    fn test_bad_endpoint_is_error_result() {
        let mut config = Config::default();
        config.vpic.base_url = "not a url".to_string();

        let result =
            AuditVehicleSafetyTool::call(&args(serde_json::json!({"vin": "5UXWX7C50BA"})), &config);
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("invalid provider endpoint"));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = AuditVehicleSafetyTool::to_tool();
        assert_eq!(tool.name, "audit_vehicle_safety");
        assert_eq!(
            tool.description.as_deref(),
            Some("Audits a US vehicle VIN for specs and active vehicle recalls")
        );

        let schema = serde_json::Value::Object((*tool.input_schema).clone());
        assert_eq!(schema["required"], serde_json::json!(["vin"]));
        assert_eq!(schema["properties"]["vin"]["type"], "string");
        assert_eq!(
            schema["properties"]["vin"]["description"],
            "The VIN of the vehicle to audit"
        );
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_rejects_non_object() {
        let result = AuditVehicleSafetyTool::http_handler(
            serde_json::json!(["5UXWX7C50BA"]),
            Arc::new(Config::default()),
        );
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_null_arguments() {
        let response =
            AuditVehicleSafetyTool::http_handler(serde_json::Value::Null, Arc::new(Config::default()))
                .unwrap();
        assert_eq!(response["isError"], true);
        assert_eq!(response["content"][0]["text"], "required argument \"vin\" not found");
    }

    // Live vPIC call (requires network, run with: cargo test -- --ignored)
    #[ignore]
    #[test]
    fn test_audit_live_vin() {
        let params = AuditVehicleParams {
            vin: "5UXWX7C50BA".to_string(),
        };
        let result = AuditVehicleSafetyTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(false));
        assert!(text_of(&result).contains("BMW"));
    }
}
