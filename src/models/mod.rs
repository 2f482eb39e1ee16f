use serde::{Deserialize, Serialize};

pub mod movie;
pub mod session;

pub use movie::{MovieDetails, MovieRecord, Recommendation};
pub use session::{Favourite, Screen, SessionEvent, SessionState};

// ============================================================================
// Page view models
// ============================================================================

/// A clickable poster tile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tile {
    pub title: String,
    pub poster_url: String,
}

/// A recommendation tile, carrying the similarity score it was ranked by
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedTile {
    pub title: String,
    pub score: f32,
    pub poster_url: String,
}

/// Fully rendered detail card; missing metadata is already substituted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailCard {
    pub title: String,
    pub poster_url: String,
    pub plot: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub imdb_url: Option<String>,
}

/// View model for whatever screen a session currently shows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Page {
    Main {
        movies: Vec<String>,
        trending: Vec<Tile>,
        popular: Vec<Tile>,
    },
    Recommendations {
        query: String,
        recommendations: Vec<RecommendedTile>,
        trending: Vec<Tile>,
    },
    Detail {
        card: DetailCard,
        is_favourite: bool,
        trending: Vec<Tile>,
    },
    Favourites {
        favourites: Vec<Tile>,
    },
}
