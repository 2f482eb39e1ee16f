use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use movie_recommender::{
    api::{create_router, AppState},
    config::Config,
    services::{providers::OmdbProvider, Catalog, Recommender, SimilarityMatrix},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    // Both artifacts must agree on N before anything is served
    let catalog = Catalog::from_csv_path(&config.movies_path)?;
    let matrix = SimilarityMatrix::from_json_path(&config.similarity_path)?;
    let recommender = Recommender::new(Arc::new(catalog), Arc::new(matrix))?;

    let metadata = OmdbProvider::new(
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
        Duration::from_secs(config.metadata_timeout_secs),
    )?;

    let session_ttl = config.session_ttl()?;
    let state = AppState::new(recommender, Arc::new(metadata), config.page_settings())
        .with_session_ttl(session_ttl);

    // Idle sessions are also swept on creation; this catches servers that stop
    // receiving new sessions
    let sweeper = state.clone();
    let sweep_every = session_ttl.to_std()?;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            sweeper.evict_expired(chrono::Utc::now()).await;
        }
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
