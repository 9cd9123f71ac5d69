//! Response envelopes returned by the add-in directory.
//!
//! The remote payloads are treated as opaque JSON and handed back to callers
//! unmodified; the accessors below only read the top-level envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a search request: `{ "TotalCount": n, "Values": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResult(Value);

impl SearchResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Total number of matches reported by the service.
    pub fn total_count(&self) -> Option<u64> {
        self.0.get("TotalCount").and_then(Value::as_u64)
    }

    /// Add-ins on the current page.
    pub fn values(&self) -> &[Value] {
        self.0
            .get("Values")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }
}

/// Result of a details request for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddinDetailsResult(Value);

impl AddinDetailsResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The add-in record, when the payload uses the `value` envelope.
    pub fn addin(&self) -> Option<&Value> {
        self.0.get("value").or_else(|| self.0.get("Value"))
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }
}
