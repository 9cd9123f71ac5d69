//! Server infrastructure that is independent of the add-in directory:
//! configuration, the rmcp handler and the transports it runs on.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{AddinsApiConfig, Config};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
