//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool names, checked against the router in tests

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use super::definitions::{GetAddinDetailsTool, SearchAddinsTool};
use crate::domains::addins::AddinDirectory;

#[cfg(feature = "http")]
use super::ToolError;

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when http feature is enabled)
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    directory: Arc<dyn AddinDirectory>,
}

impl ToolRegistry {
    /// Create a new tool registry backed by `directory`.
    pub fn new(directory: Arc<dyn AddinDirectory>) -> Self {
        Self { directory }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![GetAddinDetailsTool::NAME, SearchAddinsTool::NAME]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            GetAddinDetailsTool::NAME => {
                GetAddinDetailsTool::http_handler(arguments, self.directory.clone()).await
            }
            SearchAddinsTool::NAME => {
                SearchAddinsTool::http_handler(arguments, self.directory.clone()).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
