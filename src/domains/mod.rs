//! Domains module containing business logic organized by bounded contexts.
//!
//! - **addins**: the Office add-in directory client and its query model
//! - **tools**: MCP tools exposing the directory to clients

pub mod addins;
pub mod tools;
