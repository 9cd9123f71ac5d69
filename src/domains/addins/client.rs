//! HTTP client for the Office add-in directory API.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::error::{AddinError, AddinResult};
use super::models::{AddinDetailsResult, SearchResult};
use super::query::{QueryBuilder, SearchFilters};
use crate::core::config::AddinsApiConfig;

const DETAILS_PATH: &str = "addins/details";
const SEARCH_PATH: &str = "addins/search";

/// Read-only access to the add-in directory.
///
/// Tool definitions depend on this trait rather than on [`AddinClient`]
/// directly so they can run against an in-memory directory in tests.
#[async_trait]
pub trait AddinDirectory: Send + Sync {
    /// Fetch the listing of a single add-in.
    async fn fetch_details(&self, asset_id: &str) -> AddinResult<AddinDetailsResult>;

    /// Search the directory.
    async fn search(&self, filters: &SearchFilters) -> AddinResult<SearchResult>;
}

/// Race `request` against `cancel`.
///
/// If `cancel` completes first the request future is dropped, which aborts
/// its connection, and [`AddinError::Cancelled`] is returned.
pub async fn with_cancellation<T, F, C>(request: F, cancel: C) -> AddinResult<T>
where
    F: Future<Output = AddinResult<T>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = cancel => {
            info!("Add-in directory request cancelled by caller");
            Err(AddinError::Cancelled)
        }
        result = request => result,
    }
}

/// Client for `https://api.addins.omex.office.net/api`.
///
/// Holds no per-call state. Idle connections are not kept, so each request
/// opens and releases its own connection.
#[derive(Debug, Clone)]
pub struct AddinClient {
    http: Client,
    details_endpoint: Url,
    search_endpoint: Url,
    timeout: Duration,
}

impl AddinClient {
    /// Create a client from the API configuration.
    pub fn new(config: &AddinsApiConfig) -> AddinResult<Self> {
        Self::with_base_url(&config.base_url, config.timeout())
    }

    /// Create a client against a custom base URL (e.g. a local mock).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> AddinResult<Self> {
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(|e| {
            AddinError::invalid_argument(format!("invalid base URL '{}': {}", base_url, e))
        })?;
        let join = |path: &str| {
            base.join(path).map_err(|e| {
                AddinError::invalid_argument(format!("invalid endpoint '{}': {}", path, e))
            })
        };

        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AddinError::Client)?;

        Ok(Self {
            http,
            details_endpoint: join(DETAILS_PATH)?,
            search_endpoint: join(SEARCH_PATH)?,
            timeout,
        })
    }

    pub fn details_endpoint(&self) -> &Url {
        &self.details_endpoint
    }

    pub fn search_endpoint(&self) -> &Url {
        &self.search_endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `assetid=<asset_id>` from the details endpoint.
    #[instrument(skip(self))]
    pub async fn fetch_details(&self, asset_id: &str) -> AddinResult<AddinDetailsResult> {
        let url = QueryBuilder::build_details_target(&self.details_endpoint, asset_id)?;
        info!("Fetching add-in details for asset ID: {}", asset_id.trim());
        self.get_json(url).await.map(AddinDetailsResult::new)
    }

    /// GET the search endpoint with the query built from `filters`.
    #[instrument(skip_all)]
    pub async fn search(&self, filters: &SearchFilters) -> AddinResult<SearchResult> {
        let url = QueryBuilder::build_search_target(&self.search_endpoint, filters);
        info!(
            "Searching add-ins with {} filter(s)",
            QueryBuilder::build(filters).len()
        );
        self.get_json(url).await.map(SearchResult::new)
    }

    /// [`AddinClient::fetch_details`], abandoned as soon as `cancel` completes.
    pub async fn fetch_details_cancellable<C>(
        &self,
        asset_id: &str,
        cancel: C,
    ) -> AddinResult<AddinDetailsResult>
    where
        C: Future<Output = ()>,
    {
        with_cancellation(self.fetch_details(asset_id), cancel).await
    }

    /// [`AddinClient::search`], abandoned as soon as `cancel` completes.
    pub async fn search_cancellable<C>(
        &self,
        filters: &SearchFilters,
        cancel: C,
    ) -> AddinResult<SearchResult>
    where
        C: Future<Output = ()>,
    {
        with_cancellation(self.search(filters), cancel).await
    }

    async fn get_json(&self, url: Url) -> AddinResult<Value> {
        debug!("GET {}", url);

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!("Request to add-in directory failed: {}", e);
            AddinError::UpstreamNetwork(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read add-in directory response: {}", e);
            AddinError::UpstreamNetwork(e)
        })?;

        if !status.is_success() {
            warn!("Add-in directory returned HTTP {}", status.as_u16());
            return Err(AddinError::UpstreamHttp {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Add-in directory returned a non-JSON body: {}", e);
            AddinError::InvalidResponse(e)
        })
    }
}

#[async_trait]
impl AddinDirectory for AddinClient {
    async fn fetch_details(&self, asset_id: &str) -> AddinResult<AddinDetailsResult> {
        AddinClient::fetch_details(self, asset_id).await
    }

    async fn search(&self, filters: &SearchFilters) -> AddinResult<SearchResult> {
        AddinClient::search(self, filters).await
    }
}
