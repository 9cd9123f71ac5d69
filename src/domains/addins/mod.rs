//! Add-in directory domain.
//!
//! Wraps the two read-only endpoints of the Office add-in directory:
//!
//! - `query.rs` - search filters and query-string construction
//! - `client.rs` - the HTTP client and the [`AddinDirectory`] seam used by tools
//! - `models.rs` - pass-through response envelopes
//! - `error.rs` - one error variant per failure kind

mod client;
mod error;
mod models;
mod query;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{AddinClient, AddinDirectory, with_cancellation};
pub use error::{AddinError, AddinResult};
pub use models::{AddinDetailsResult, SearchResult};
pub use query::{OrderBy, OrderField, QueryBuilder, SearchFilters};
