use serde::{Deserialize, Serialize};

/// A single catalog entry as held by the record store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Row index assigned at load time, in source order
    pub id: usize,
    /// Display title, also the lookup key
    pub title: String,
    /// Normalized text document derived from genre, cast and crew
    pub tag: String,
    /// IMDb identifier, passed through for display collaborators
    pub imdb_id: Option<String>,
    pub release_year: Option<i32>,
}

/// Raw metadata fields for one corpus row, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieRecord {
    pub title: Option<String>,
    pub imdb_id: Option<String>,
    pub release_year: Option<String>,
    pub genre: Option<String>,
    pub actors: Option<String>,
    pub directors: Option<String>,
    pub writers: Option<String>,
}

impl MovieRecord {
    /// Returns the trimmed title, or `None` when the record has no usable title
    pub fn title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Parses the release year cell, ignoring anything that is not an integer
    pub fn release_year(&self) -> Option<i32> {
        self.release_year
            .as_deref()
            .and_then(|y| y.trim().parse::<i32>().ok())
    }

    pub fn imdb_id(&self) -> Option<String> {
        self.imdb_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}
