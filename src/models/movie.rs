use serde::{Deserialize, Serialize};

/// One row of the movie dataset
///
/// Only the title is required. Datasets exported with an `original_title`
/// column are accepted as-is; any other columns are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    #[serde(alias = "original_title")]
    pub title: String,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// A ranked neighbour of the query movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub score: f32,
}

/// Metadata for a single title as reported by the metadata service
///
/// Every field is optional; the service omits or blanks fields freely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub poster_url: Option<String>,
    pub plot: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub imdb_id: Option<String>,
}

impl MovieDetails {
    /// Link to the IMDb page, when the service knew the id
    pub fn imdb_url(&self) -> Option<String> {
        self.imdb_id
            .as_ref()
            .map(|id| format!("https://www.imdb.com/title/{}", id))
    }
}
