use async_trait::async_trait;
use cinescout_models::MovieDetail;

use crate::api::SearchPage;
use crate::error::CatalogError;

/// The movie database the core fetches from.
///
/// `OmdbClient` is the real implementation; tests substitute scripted
/// fakes so session behavior is checked without a network.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Title search, one page at a time. A query with no matches is a
    /// successful empty page, not an error.
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError>;

    /// Look up a single movie by IMDb identifier.
    async fn lookup(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError>;
}
