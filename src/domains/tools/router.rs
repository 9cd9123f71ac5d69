//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for the STDIO transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{GetAddinDetailsTool, SearchAddinsTool};
use crate::domains::addins::AddinDirectory;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(directory: Arc<dyn AddinDirectory>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetAddinDetailsTool::create_route(directory.clone()))
        .with_route(SearchAddinsTool::create_route(directory))
}
