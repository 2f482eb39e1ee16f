use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{DetailCard, MovieDetails, Page, RecommendedTile, Screen, SessionState},
    services::{
        providers::{details_or_placeholder, fetch_tiles, MetadataProvider},
        recommender::Recommender,
        trending,
    },
};

const NOT_AVAILABLE: &str = "N/A";

/// Knobs for assembling pages
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub recommendation_count: usize,
    pub trending_pool_size: usize,
    pub trending_sample_size: usize,
    pub popular_titles: Vec<String>,
    pub placeholder_poster_url: String,
}

/// Assembles the view model for the session's current screen
///
/// Metadata failures never fail the page; affected tiles and cards fall back
/// to placeholders. Only ranking errors (an unknown query) are returned.
pub async fn render(
    recommender: &Recommender,
    metadata: Arc<dyn MetadataProvider>,
    settings: &PageSettings,
    session: &SessionState,
    seed: u64,
) -> AppResult<Page> {
    let placeholder = settings.placeholder_poster_url.as_str();
    let trending_titles = |exclude: Option<&str>| {
        trending::sample(
            recommender.catalog(),
            settings.trending_pool_size,
            settings.trending_sample_size,
            seed,
            exclude,
        )
    };

    let page = match &session.screen {
        Screen::Main => {
            let movies = recommender.catalog().titles().map(String::from).collect();
            let (trending, popular) = tokio::join!(
                fetch_tiles(metadata.clone(), trending_titles(None), placeholder),
                fetch_tiles(metadata, settings.popular_titles.clone(), placeholder),
            );

            Page::Main {
                movies,
                trending,
                popular,
            }
        }
        Screen::Recommendations { query } => {
            let ranked = recommender.recommend(query, settings.recommendation_count)?;
            let titles = ranked.iter().map(|r| r.title.clone()).collect();
            let mut posters = fetch_tiles(metadata.clone(), titles, placeholder)
                .await
                .into_iter();

            let recommendations = ranked
                .into_iter()
                .map(|rec| {
                    let poster_url = posters
                        .next()
                        .filter(|tile| tile.title == rec.title)
                        .map(|tile| tile.poster_url)
                        .unwrap_or_else(|| placeholder.to_string());
                    RecommendedTile {
                        title: rec.title,
                        score: rec.score,
                        poster_url,
                    }
                })
                .collect();
            let trending =
                fetch_tiles(metadata, trending_titles(Some(query.as_str())), placeholder).await;

            Page::Recommendations {
                query: query.clone(),
                recommendations,
                trending,
            }
        }
        Screen::Detail { title } => {
            let details = details_or_placeholder(metadata.as_ref(), title).await;
            let card = detail_card(title, details, placeholder);
            let trending =
                fetch_tiles(metadata, trending_titles(Some(title.as_str())), placeholder).await;

            Page::Detail {
                card,
                is_favourite: session.is_favourite(title),
                trending,
            }
        }
        Screen::Favourites => Page::Favourites {
            favourites: fetch_tiles(metadata, session.favourite_titles(), placeholder).await,
        },
    };

    Ok(page)
}

/// Fills a detail card, substituting "N/A" and the placeholder poster
pub fn detail_card(title: &str, details: MovieDetails, placeholder_poster_url: &str) -> DetailCard {
    let imdb_url = details.imdb_url();
    let text = |field: Option<String>| field.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    DetailCard {
        title: title.to_string(),
        poster_url: details
            .poster_url
            .unwrap_or_else(|| placeholder_poster_url.to_string()),
        plot: text(details.plot),
        director: text(details.director),
        writer: text(details.writer),
        actors: text(details.actors),
        imdb_url,
    }
}
