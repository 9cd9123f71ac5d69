//! In-memory directory used by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{
    AddinDetailsResult, AddinDirectory, AddinError, AddinResult, QueryBuilder, SearchFilters,
    SearchResult,
};

/// Serves one canned add-in and records every search query it receives.
#[derive(Default)]
pub struct StaticDirectory {
    pub queries: Mutex<Vec<String>>,
}

impl StaticDirectory {
    pub const KNOWN_ID: &'static str = "WA104381441";

    pub fn addin() -> Value {
        json!({
            "Id": Self::KNOWN_ID,
            "Title": "Zoom for Outlook",
            "Rating": 4.1
        })
    }
}

#[async_trait]
impl AddinDirectory for StaticDirectory {
    async fn fetch_details(&self, asset_id: &str) -> AddinResult<AddinDetailsResult> {
        if asset_id.trim().is_empty() {
            return Err(AddinError::invalid_argument("asset_id must not be empty"));
        }
        if asset_id == Self::KNOWN_ID {
            Ok(AddinDetailsResult::new(json!({ "value": Self::addin() })))
        } else {
            Err(AddinError::UpstreamHttp {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }

    async fn search(&self, filters: &SearchFilters) -> AddinResult<SearchResult> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(QueryBuilder::to_query_string(filters));
        }
        Ok(SearchResult::new(json!({
            "TotalCount": 1,
            "Values": [Self::addin()]
        })))
    }
}
