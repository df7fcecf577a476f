use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::movie::{MovieDetail, MovieSummary};

/// A movie the user saved. One entry per imdb_id; insertion order is the
/// only ordering guarantee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(default = "Utc::now")]
    pub date_added: DateTime<Utc>,
}

impl From<&MovieSummary> for WatchlistEntry {
    fn from(movie: &MovieSummary) -> Self {
        Self {
            imdb_id: movie.imdb_id.clone(),
            title: movie.title.clone(),
            year: movie.year.clone(),
            poster: movie.poster.clone(),
            imdb_rating: movie.imdb_rating.clone(),
            date_added: Utc::now(),
        }
    }
}

impl From<&MovieDetail> for WatchlistEntry {
    fn from(movie: &MovieDetail) -> Self {
        WatchlistEntry::from(&movie.to_summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_summary() {
        let summary = MovieSummary {
            imdb_id: "tt0848228".to_string(),
            title: "The Avengers".to_string(),
            year: "2012".to_string(),
            poster: "https://example.com/a.jpg".to_string(),
            released: None,
            imdb_rating: Some("8.0".to_string()),
        };

        let entry = WatchlistEntry::from(&summary);
        assert_eq!(entry.imdb_id, "tt0848228");
        assert_eq!(entry.imdb_rating.as_deref(), Some("8.0"));
    }

    #[test]
    fn test_entry_decodes_without_date_added() {
        // Entries persisted by the browser version carried no timestamp
        let raw = r#"{"imdb_id":"tt001","title":"Old","year":"1990"}"#;
        let entry: WatchlistEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.imdb_id, "tt001");
        assert_eq!(entry.poster, "");
    }
}
