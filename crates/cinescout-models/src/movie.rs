use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimal record returned by a title search.
///
/// Field names map onto the OMDb wire format (PascalCase). `released` and
/// `imdb_rating` are only present on some responses; search pages usually
/// omit them, so both default to absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Released", default, skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(rename = "imdbRating", default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
}

impl MovieSummary {
    pub fn release_date(&self) -> Option<NaiveDate> {
        parse_release_date(self.released.as_deref())
    }

    pub fn rating(&self) -> Option<f64> {
        parse_rating(self.imdb_rating.as_deref())
    }
}

/// Extended record returned by an identifier lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    /// Audience rating label, e.g. "PG-13". "N/A" when unrated.
    #[serde(rename = "Rated", default)]
    pub rated: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
}

impl MovieDetail {
    pub fn release_date(&self) -> Option<NaiveDate> {
        parse_release_date(Some(&self.released))
    }

    pub fn rating(&self) -> Option<f64> {
        parse_rating(Some(&self.imdb_rating))
    }

    pub fn genres(&self) -> Vec<String> {
        split_comma_list(&self.genre)
    }

    pub fn cast(&self) -> Vec<String> {
        split_comma_list(&self.actors)
    }

    pub fn to_summary(&self) -> MovieSummary {
        MovieSummary {
            imdb_id: self.imdb_id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster: self.poster.clone(),
            released: none_if_na(&self.released),
            imdb_rating: none_if_na(&self.imdb_rating),
        }
    }
}

/// OMDb dates look like "02 May 2008"; "N/A" marks an unknown date.
pub fn parse_release_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "N/A" {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%d %b %Y").ok()
}

/// Numeric rating on the 0.0-10.0 scale; "N/A" and garbage are unrated.
pub fn parse_rating(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "N/A" {
        return None;
    }
    raw.parse::<f64>().ok().filter(|r| (0.0..=10.0).contains(r))
}

fn split_comma_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() || raw == "N/A" {
        return Vec::new();
    }
    raw.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn none_if_na(raw: &str) -> Option<String> {
    if raw.trim().is_empty() || raw == "N/A" {
        None
    } else {
        Some(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date(Some("02 May 2008")),
            NaiveDate::from_ymd_opt(2008, 5, 2)
        );
        assert_eq!(parse_release_date(Some("N/A")), None);
        assert_eq!(parse_release_date(Some("")), None);
        assert_eq!(parse_release_date(Some("sometime in 2008")), None);
        assert_eq!(parse_release_date(None), None);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating(Some("8.1")), Some(8.1));
        assert_eq!(parse_rating(Some("N/A")), None);
        assert_eq!(parse_rating(Some("not rated")), None);
        assert_eq!(parse_rating(Some("11.0")), None); // outside the 0-10 scale
        assert_eq!(parse_rating(None), None);
    }

    #[test]
    fn test_summary_decodes_omdb_search_item() {
        let raw = r#"{
            "Title": "The Dark Knight",
            "Year": "2008",
            "imdbID": "tt0468569",
            "Type": "movie",
            "Poster": "https://example.com/poster.jpg"
        }"#;

        let summary: MovieSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(summary.imdb_id, "tt0468569");
        assert_eq!(summary.title, "The Dark Knight");
        assert_eq!(summary.year, "2008");
        assert_eq!(summary.released, None);
        assert_eq!(summary.imdb_rating, None);
        assert_eq!(summary.rating(), None);
    }

    #[test]
    fn test_detail_decodes_omdb_lookup_payload() {
        let raw = r#"{
            "Title": "The Dark Knight",
            "Year": "2008",
            "Rated": "PG-13",
            "Released": "18 Jul 2008",
            "Genre": "Action, Crime, Drama",
            "Director": "Christopher Nolan",
            "Actors": "Christian Bale, Heath Ledger, Aaron Eckhart",
            "Plot": "Batman raises the stakes in his war on crime.",
            "Poster": "https://example.com/poster.jpg",
            "imdbRating": "9.0",
            "imdbID": "tt0468569",
            "Response": "True"
        }"#;

        let detail: MovieDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.director, "Christopher Nolan");
        assert_eq!(detail.rating(), Some(9.0));
        assert_eq!(
            detail.release_date(),
            NaiveDate::from_ymd_opt(2008, 7, 18)
        );
        assert_eq!(
            detail.genres(),
            vec!["Action", "Crime", "Drama"]
        );
        assert_eq!(detail.cast().len(), 3);
        assert_eq!(detail.cast()[1], "Heath Ledger");
    }

    #[test]
    fn test_detail_to_summary_drops_na_fields() {
        let detail = MovieDetail {
            imdb_id: "tt001".to_string(),
            title: "Some Movie".to_string(),
            year: "1999".to_string(),
            poster: "N/A".to_string(),
            released: "N/A".to_string(),
            director: "N/A".to_string(),
            genre: "N/A".to_string(),
            plot: String::new(),
            rated: "N/A".to_string(),
            actors: "N/A".to_string(),
            imdb_rating: "7.5".to_string(),
        };

        let summary = detail.to_summary();
        assert_eq!(summary.released, None);
        assert_eq!(summary.imdb_rating.as_deref(), Some("7.5"));
        assert!(detail.genres().is_empty());
        assert!(detail.cast().is_empty());
    }
}
