//! Add-in details tool.
//!
//! Looks up a single listing in the Office add-in directory by asset ID and
//! returns the directory's JSON unchanged.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{addin_error_result, structured_result};
use crate::domains::addins::{AddinDirectory, with_cancellation};

#[cfg(feature = "http")]
use super::common::call_result_to_json;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the add-in details tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetAddinDetailsParams {
    /// Asset ID assigned by the Office Store.
    #[schemars(description = "The unique asset ID of the add-in (e.g. \"WA104381441\")")]
    pub asset_id: String,
}

/// Add-in details tool implementation.
#[derive(Debug, Clone)]
pub struct GetAddinDetailsTool;

impl GetAddinDetailsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_addin_details";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Fetch details of a Microsoft Office add-in by its asset ID.";

    /// Execute the tool logic, abandoning the request if `cancel` completes.
    #[instrument(skip_all, fields(asset_id = %params.asset_id))]
    pub async fn execute<C>(
        params: &GetAddinDetailsParams,
        directory: &dyn AddinDirectory,
        cancel: C,
    ) -> Result<CallToolResult, McpError>
    where
        C: Future<Output = ()>,
    {
        info!("Get add-in details tool called");

        match with_cancellation(directory.fetch_details(&params.asset_id), cancel).await {
            Ok(details) => Ok(structured_result(details.into_json())),
            Err(e) => addin_error_result(e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        directory: Arc<dyn AddinDirectory>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GetAddinDetailsParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let result =
            Self::execute(&params, directory.as_ref(), futures::future::pending()).await?;

        Ok(call_result_to_json(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetAddinDetailsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the STDIO transport.
    pub fn create_route<S>(directory: Arc<dyn AddinDirectory>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let ct = ctx.request_context.ct.clone();
            let directory = directory.clone();
            async move {
                let params: GetAddinDetailsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Self::execute(&params, directory.as_ref(), ct.cancelled()).await
            }
            .boxed()
        })
    }
}
