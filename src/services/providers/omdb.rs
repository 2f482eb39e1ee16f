/// OMDb API provider
///
/// Looks titles up with `/?t={title}` and maps the response onto
/// `MovieDetails`. OMDb reports missing fields as the literal string "N/A" and
/// signals lookup failures in-band with `"Response": "False"`.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::MovieDetails,
    services::providers::MetadataProvider,
};

const MISSING: &str = "N/A";

/// Raw response from the OMDb title endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Writer", default)]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
}

impl OmdbResponse {
    fn into_details(self, title: &str) -> AppResult<MovieDetails> {
        if !self.response.eq_ignore_ascii_case("true") {
            return Err(AppError::ExternalApi(format!(
                "OMDb lookup for '{}' failed: {}",
                title,
                self.error.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        Ok(MovieDetails {
            poster_url: present(self.poster),
            plot: present(self.plot),
            director: present(self.director),
            writer: present(self.writer),
            actors: present(self.actors),
            imdb_id: present(self.imdb_id),
        })
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| {
        let value = value.trim();
        !value.is_empty() && value != MISSING
    })
}

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbProvider {
    async fn fetch_details(&self, title: &str) -> AppResult<MovieDetails> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
        }

        let url = format!("{}/", self.api_url.trim_end_matches('/'));
        let response = self
            .http_client
            .get(&url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw OMDb API response");

        let parsed: OmdbResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize OMDb response"
            );
            AppError::ExternalApi(format!("Failed to parse OMDb response: {}", e))
        })?;

        let details = parsed.into_details(title)?;

        tracing::info!(
            title = %title,
            has_poster = details.poster_url.is_some(),
            provider = "omdb",
            "Metadata fetched"
        );

        Ok(details)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
