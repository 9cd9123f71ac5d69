//! Common helpers shared by the add-in directory tools.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use serde_json::Value;
use tracing::warn;

use crate::domains::addins::AddinError;

/// Wrap a pass-through JSON payload as a successful tool result.
pub fn structured_result(payload: Value) -> CallToolResult {
    CallToolResult::structured(payload)
}

/// Map a directory failure onto the MCP surface.
///
/// Local precondition failures become `invalid_params` protocol errors and
/// cancellation an internal error; upstream failures are reported as a tool
/// result flagged `isError` carrying the structured error payload, so the
/// calling agent can see status and body.
pub fn addin_error_result(err: AddinError) -> Result<CallToolResult, McpError> {
    match err {
        AddinError::InvalidArgument(msg) => Err(McpError::invalid_params(msg, None)),
        AddinError::Cancelled => Err(McpError::internal_error("Request cancelled", None)),
        err => {
            warn!("Add-in directory call failed: {}", err);
            Ok(CallToolResult::structured_error(err.to_json()))
        }
    }
}

/// Convert a tool result into the JSON shape returned by the HTTP transport.
#[cfg(feature = "http")]
pub fn call_result_to_json(result: CallToolResult) -> Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });

    if let Some(structured) = result.structured_content {
        response["structuredContent"] = structured;
    }

    response
}
