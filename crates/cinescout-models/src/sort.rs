use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::movie::MovieSummary;

/// Client-side sort order for an accumulated result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    ReleaseDate,
    Rating,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "released" | "release-date" | "release_date" => Ok(SortKey::ReleaseDate),
            "rating" => Ok(SortKey::Rating),
            _ => Err(format!(
                "Invalid sort key: {}. Use 'title', 'released', or 'rating'",
                s
            )),
        }
    }
}

/// Stable re-order of `movies` by the selected key.
///
/// Title sorts lexicographically ascending (case-insensitive). Release date
/// sorts chronologically ascending; items with no parseable date sort
/// earliest. Rating sorts numerically descending; unrated items sort last.
pub fn sort_movies(movies: &mut [MovieSummary], key: SortKey) {
    match key {
        SortKey::Title => {
            movies.sort_by_key(|m| m.title.to_lowercase());
        }
        SortKey::ReleaseDate => {
            movies.sort_by_key(|m| m.release_date().unwrap_or(NaiveDate::MIN));
        }
        SortKey::Rating => {
            movies.sort_by(|a, b| match (a.rating(), b.rating()) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }
    }
}
