//! MCP tools over the add-in directory.
//!
//! Both tools are read-only and map one call onto one upstream request:
//!
//! - `get_addin_details` fetches the listing of a single asset ID
//! - `search_addins` runs a filtered directory search
//!
//! Each tool lives in `definitions/addins/` and provides its own rmcp route
//! (`router.rs`, STDIO) and HTTP handler (`registry.rs`).

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
