//! Add-in search tool.
//!
//! Searches the Office add-in directory with optional filtering, sorting and
//! paging. Every argument is optional; a call without arguments runs the
//! directory's default search. Results are returned exactly as the
//! directory sends them (`TotalCount` plus the `Values` page).

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use tracing::{debug, info, instrument};

use super::common::{addin_error_result, structured_result};
use crate::domains::addins::{AddinDirectory, QueryBuilder, SearchFilters, with_cancellation};

#[cfg(feature = "http")]
use super::common::call_result_to_json;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the search tool are the search filters themselves.
pub type SearchAddinsParams = SearchFilters;

/// Add-in search tool implementation.
#[derive(Debug, Clone)]
pub struct SearchAddinsTool;

impl SearchAddinsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_addins";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search for Office Add-ins using comprehensive filtering, sorting, and pagination options. Returns TotalCount and the Values page of matching add-ins.";

    /// Execute the tool logic, abandoning the request if `cancel` completes.
    #[instrument(skip_all)]
    pub async fn execute<C>(
        params: &SearchAddinsParams,
        directory: &dyn AddinDirectory,
        cancel: C,
    ) -> Result<CallToolResult, McpError>
    where
        C: Future<Output = ()>,
    {
        info!("Search add-ins tool called");
        debug!("Search query: {}", QueryBuilder::to_query_string(params));

        match with_cancellation(directory.search(params), cancel).await {
            Ok(result) => {
                if let Some(total) = result.total_count() {
                    info!(
                        "Search returned {} of {} add-in(s)",
                        result.values().len(),
                        total
                    );
                }
                Ok(structured_result(result.into_json()))
            }
            Err(e) => addin_error_result(e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        directory: Arc<dyn AddinDirectory>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: SearchAddinsParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<SearchAddinsParams>(),
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
                let params: SearchAddinsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Self::execute(&params, directory.as_ref(), ct.cancelled()).await
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::addins::testing::StaticDirectory;
    use crate::domains::addins::{OrderBy, OrderField};

    #[test]
    fn test_empty_arguments_are_valid() {
        let params: SearchAddinsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, SearchFilters::default());
    }

    #[test]
    fn test_wrongly_typed_argument_rejected() {
        assert!(serde_json::from_str::<SearchAddinsParams>(r#"{"top": "ten"}"#).is_err());
        assert!(serde_json::from_str::<SearchAddinsParams>(r#"{"clients": "Win32_Excel"}"#).is_err());
    }

    #[tokio::test]
    async fn test_execute_forwards_filters() {
        let directory = StaticDirectory::default();
        let params = SearchFilters::new()
            .query("productivity")
            .clients(["Win32_Excel"])
            .free(true)
            .order(OrderField::Rating, OrderBy::Desc)
            .top(10);

        let result = SearchAddinsTool::execute(&params, &directory, futures::future::pending())
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["TotalCount"], 1);
        assert_eq!(
            directory.queries.lock().unwrap().as_slice(),
            ["qu=productivity&free=true&clients=Win32_Excel&orderfield=Rating&orderby=Desc&top=10"]
        );
    }

    #[tokio::test]
    async fn test_execute_without_filters() {
        let directory = StaticDirectory::default();
        SearchAddinsTool::execute(&SearchFilters::default(), &directory, futures::future::pending())
            .await
            .unwrap();
        assert_eq!(directory.queries.lock().unwrap().as_slice(), [""]);
    }

    #[test]
    fn test_tool_schema_uses_tool_argument_names() {
        let tool = SearchAddinsTool::to_tool();
        assert_eq!(tool.name, "search_addins");
        let schema = serde_json::Value::Object((*tool.input_schema).clone());
        let properties = &schema["properties"];
        for name in [
            "query",
            "category",
            "free",
            "clients",
            "productgroup",
            "productids",
            "assetids",
            "providertype",
            "orderfield",
            "orderby",
            "top",
            "skiptoitem",
            "date",
            "getMetaOSApps",
        ] {
            assert!(properties.get(name).is_some(), "missing property {}", name);
        }
    }
}
