use std::time::Duration;

use async_trait::async_trait;
use cinescout_models::MovieDetail;
use reqwest::Client;

use crate::api;
use crate::api::SearchPage;
use crate::error::CatalogError;
use crate::traits::MovieCatalog;

/// A request that hangs would wedge the whole session loop.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the OMDb API, authenticated by a static key.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: api::DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different endpoint (used by integration tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl MovieCatalog for OmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError> {
        api::search_by_title(&self.client, &self.base_url, &self.api_key, query, page).await
    }

    async fn lookup(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        api::lookup_by_id(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}
