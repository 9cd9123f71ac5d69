//! Office Add-ins MCP Server Library
//!
//! Exposes the Microsoft Office add-in directory
//! (`https://api.addins.omex.office.net/api`) to Model Context Protocol
//! clients through two read-only tools: `get_addin_details` and
//! `search_addins`.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**
//!   - **addins**: search filters, query construction and the directory HTTP client
//!   - **tools**: MCP tool definitions, router and registry
//!
//! # Example
//!
//! ```rust,no_run
//! use office_addins_mcp_server::domains::addins::{AddinClient, SearchFilters};
//! use office_addins_mcp_server::core::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let client = AddinClient::new(&config.addins)?;
//!     let result = client.search(&SearchFilters::new().query("Zoom").top(5)).await?;
//!     println!("{} add-ins found", result.total_count().unwrap_or(0));
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::addins::{AddinClient, AddinError, SearchFilters};
