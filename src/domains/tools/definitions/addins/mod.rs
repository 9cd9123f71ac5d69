//! Office add-in directory tools module.
//!
//! - `details`: fetch one add-in listing by asset ID
//! - `search`: search the directory with optional filters
//!
//! Each tool has handlers for both the HTTP and STDIO transports.

pub mod common;
pub mod details;
pub mod search;

pub use details::{GetAddinDetailsParams, GetAddinDetailsTool};
pub use search::{SearchAddinsParams, SearchAddinsTool};
