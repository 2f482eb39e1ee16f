use anyhow::bail;
use chrono::TimeDelta;
use serde::Deserialize;

use crate::services::pages::PageSettings;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// CSV dataset with one movie per row; row order defines catalog indices
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// JSON N×N similarity matrix aligned with the dataset rows
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// OMDb API key
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Upper bound for a single metadata request
    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,

    /// Poster shown when the metadata service has none or fails
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Trending tiles are drawn from this many leading catalog entries
    #[serde(default = "default_trending_pool_size")]
    pub trending_pool_size: usize,

    #[serde(default = "default_trending_sample_size")]
    pub trending_sample_size: usize,

    /// Curated row on the main page (comma-separated in the environment)
    #[serde(default = "default_popular_titles")]
    pub popular_titles: Vec<String>,

    /// Sessions idle for longer than this are dropped
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movies_path() -> String {
    "data/movies.csv".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com".to_string()
}

fn default_metadata_timeout_secs() -> u64 {
    5
}

fn default_placeholder_poster_url() -> String {
    "https://via.placeholder.com/300x450?text=No+Image".to_string()
}

fn default_recommendation_count() -> usize {
    5
}

fn default_trending_pool_size() -> usize {
    100
}

fn default_trending_sample_size() -> usize {
    10
}

fn default_popular_titles() -> Vec<String> {
    [
        "Inception",
        "Interstellar",
        "Avatar",
        "Titanic",
        "The Dark Knight",
        "Avengers: Endgame",
        "Joker",
        "Forrest Gump",
        "Gladiator",
        "The Matrix",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_session_ttl_secs() -> u64 {
    3600
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make pages or sessions unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.recommendation_count == 0 {
            bail!("RECOMMENDATION_COUNT must be at least 1");
        }
        if self.trending_sample_size == 0 {
            bail!("TRENDING_SAMPLE_SIZE must be at least 1");
        }
        if self.metadata_timeout_secs == 0 {
            bail!("METADATA_TIMEOUT_SECS must be at least 1");
        }
        self.session_ttl()?;
        Ok(())
    }

    pub fn session_ttl(&self) -> anyhow::Result<TimeDelta> {
        let ttl = i64::try_from(self.session_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .filter(|ttl| *ttl > TimeDelta::zero());
        match ttl {
            Some(ttl) => Ok(ttl),
            None => bail!(
                "SESSION_TTL_SECS must be between 1 and {}, got {}",
                TimeDelta::MAX.num_seconds(),
                self.session_ttl_secs
            ),
        }
    }

    /// Page assembly knobs derived from this configuration
    pub fn page_settings(&self) -> PageSettings {
        PageSettings {
            recommendation_count: self.recommendation_count,
            trending_pool_size: self.trending_pool_size,
            trending_sample_size: self.trending_sample_size,
            popular_titles: self.popular_titles.clone(),
            placeholder_poster_url: self.placeholder_poster_url.clone(),
        }
    }
}
