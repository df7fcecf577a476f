use thiserror::Error;

/// Failures talking to the movie catalog.
///
/// None of these are fatal to the caller: the search session maps every
/// variant to its error status, and a lookup failure is reported inline.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("api error: {0}")]
    Api(String),

    #[error("malformed response: {0}")]
    Decode(String),
}
