use cinescout_models::{MovieDetail, MovieSummary};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb reports "no matches" as an error payload on a 200 response.
const NO_RESULTS_ERROR: &str = "Movie not found!";

/// One page of title-search results plus the server-reported total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub items: Vec<MovieSummary>,
    pub total_results: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<MovieSummary>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

/// Fetch one page of search results for `query`.
pub async fn search_by_title(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
    page: u32,
) -> Result<SearchPage, CatalogError> {
    let url = format!(
        "{}?apikey={}&s={}&page={}&type=movie",
        base_url,
        api_key,
        urlencoding::encode(query),
        page
    );

    debug!(query, page, "fetching search page");
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(CatalogError::Status(response.status()));
    }

    let text = response.text().await?;
    let body: SearchResponse =
        serde_json::from_str(&text).map_err(|e| CatalogError::Decode(e.to_string()))?;

    if body.response != "True" {
        let message = body.error.unwrap_or_else(|| "unknown error".to_string());
        if message == NO_RESULTS_ERROR {
            return Ok(SearchPage::default());
        }
        return Err(CatalogError::Api(message));
    }

    let total_results = body
        .total_results
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0);

    Ok(SearchPage {
        items: body.search,
        total_results,
    })
}

/// Fetch the full record for one IMDb identifier.
pub async fn lookup_by_id(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetail, CatalogError> {
    let url = format!(
        "{}?apikey={}&i={}",
        base_url,
        api_key,
        urlencoding::encode(imdb_id)
    );

    debug!(imdb_id, "fetching movie detail");
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(CatalogError::Status(response.status()));
    }

    let text = response.text().await?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| CatalogError::Decode(e.to_string()))?;

    if value.get("Response").and_then(|v| v.as_str()) != Some("True") {
        let message = value
            .get("Error")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error");
        return Err(CatalogError::Api(message.to_string()));
    }

    serde_json::from_value(value).map_err(|e| CatalogError::Decode(e.to_string()))
}
