//! Transports that carry MCP messages between a client and [`McpServer`].
//!
//! Which transports exist is decided at compile time:
//!
//! | feature | transport | wire format |
//! |---|---|---|
//! | `stdio` (default) | [`stdio::StdioTransport`] | newline-delimited JSON-RPC on stdin/stdout |
//! | `http` | [`http::HttpTransport`] | one JSON-RPC request per `POST` |
//!
//! At runtime `MCP_TRANSPORT` picks one of the compiled-in transports.
//!
//! [`McpServer`]: crate::core::McpServer

mod config;
mod error;
mod service;

#[cfg(feature = "stdio")]
pub mod stdio;

#[cfg(feature = "http")]
pub mod http;

pub use config::TransportConfig;
#[cfg(feature = "http")]
pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
