//! Helpers shared by tool definitions.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Convert a tool result into the `tools/call` payload of the HTTP transport.
#[cfg(feature = "http")]
pub fn to_http_response(
    result: CallToolResult,
) -> Result<serde_json::Value, crate::domains::tools::ToolError> {
    serde_json::to_value(&result)
        .map_err(|e| crate::domains::tools::ToolError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_flags() {
        assert_eq!(error_result("boom").is_error, Some(true));
        assert_eq!(success_result("{}".to_string()).is_error, Some(false));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_response_shape() {
        let value = to_http_response(error_result("API returned status 500")).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "API returned status 500");
    }
}
