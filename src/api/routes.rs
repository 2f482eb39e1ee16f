use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog and ranking
        .route("/movies", get(handlers::list_movies))
        .route(
            "/movies/:title/recommendations",
            get(handlers::recommend),
        )
        .route("/movies/:title/details", get(handlers::movie_details))
        // Sessions
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:session_id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/:session_id/page", get(handlers::get_page))
        .route("/sessions/:session_id/events", post(handlers::apply_event))
        // Favourites
        .route(
            "/sessions/:session_id/favourites",
            post(handlers::add_favourite),
        )
        .route(
            "/sessions/:session_id/favourites/:title",
            delete(handlers::remove_favourite),
        )
}
