//! Movie metadata provider abstraction
//!
//! Posters, plots and credits come from a third-party service. Everything here
//! is best-effort: rankings never depend on it, and the page layer swaps in
//! placeholders whenever a lookup fails.

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{MovieDetails, Tile},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up metadata by exact title
    async fn fetch_details(&self, title: &str) -> AppResult<MovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fetches details, degrading any failure to empty metadata
pub async fn details_or_placeholder(provider: &dyn MetadataProvider, title: &str) -> MovieDetails {
    match provider.fetch_details(title).await {
        Ok(details) => details,
        Err(e) => {
            tracing::warn!(
                error = %e,
                title = %title,
                provider = provider.name(),
                "Metadata lookup failed, using placeholder"
            );
            MovieDetails::default()
        }
    }
}

/// Builds poster tiles for several titles in parallel, preserving input order
///
/// Every title yields exactly one tile. Titles whose lookup fails, panics or
/// has no poster get `placeholder_poster_url`.
pub async fn fetch_tiles(
    provider: Arc<dyn MetadataProvider>,
    titles: Vec<String>,
    placeholder_poster_url: &str,
) -> Vec<Tile> {
    let mut tasks = Vec::with_capacity(titles.len());

    for title in titles {
        let provider = provider.clone();
        let lookup = title.clone();
        let task = tokio::spawn(async move {
            details_or_placeholder(provider.as_ref(), &lookup)
                .await
                .poster_url
        });
        tasks.push((title, task));
    }

    let mut tiles = Vec::with_capacity(tasks.len());
    for (title, task) in tasks {
        let poster_url = match task.await {
            Ok(poster_url) => poster_url,
            Err(e) => {
                tracing::error!(error = %e, title = %title, "Poster fetch task failed");
                None
            }
        };
        tiles.push(Tile {
            title,
            poster_url: poster_url.unwrap_or_else(|| placeholder_poster_url.to_string()),
        });
    }

    tiles
}
