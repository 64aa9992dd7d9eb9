use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::{Movie, MovieRecord};

/// A recommended movie returned to the client, in rank order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedMovie {
    pub id: usize,
    pub title: String,
    pub release_year: Option<i32>,
    /// Cosine similarity to the queried movie
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<Poster>,
}

/// Response body for a recommendation query
///
/// `found` separates "no such title" from "title found but nothing to recommend".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub query: String,
    pub found: bool,
    pub recommendations: Vec<RecommendedMovie>,
}

/// Poster image reference for a title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Poster {
    pub title: String,
    pub url: String,
    /// True when `url` is the configured "no image" placeholder
    pub placeholder: bool,
}

/// Summary of the currently serving index generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexStats {
    pub generation: u64,
    pub built_at: DateTime<Utc>,
    pub items: usize,
    pub vocabulary_size: usize,
}

/// Number of movies released in one year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Subset of the OMDb `?t=` lookup response used for posters
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbTitle {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbTitle {
    /// Returns the poster URL when the lookup succeeded and a poster exists
    pub fn poster_url(self) -> Option<String> {
        if !self.response.eq_ignore_ascii_case("true") {
            return None;
        }
        self.poster
            .filter(|p| !p.trim().is_empty() && p.trim() != "N/A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omdb_title_with_poster() {
        let json = r#"{
            "Title": "Sholay",
            "Year": "1975",
            "Poster": "https://m.media-amazon.com/images/M/sholay.jpg",
            "Response": "True"
        }"#;

        let result: OmdbTitle = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.poster_url(),
            Some("https://m.media-amazon.com/images/M/sholay.jpg".to_string())
        );
    }

    #[test]
    fn test_omdb_title_without_poster() {
        let json = r#"{"Title": "Obscure", "Poster": "N/A", "Response": "True"}"#;
        let result: OmdbTitle = serde_json::from_str(json).unwrap();
        assert_eq!(result.poster_url(), None);
    }

    #[test]
    fn test_omdb_movie_not_found() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let result: OmdbTitle = serde_json::from_str(json).unwrap();
        assert_eq!(result.error.as_deref(), Some("Movie not found!"));
        assert_eq!(result.poster_url(), None);
    }

    #[test]
    fn test_recommended_movie_omits_missing_poster() {
        let movie = RecommendedMovie {
            id: 1,
            title: "Sholay".to_string(),
            release_year: Some(1975),
            score: 0.5,
            poster: None,
        };

        let json = serde_json::to_value(&movie).unwrap();
        assert!(json.get("poster").is_none());
        assert_eq!(json["score"], 0.5);
    }
}
