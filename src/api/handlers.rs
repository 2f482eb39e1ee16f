use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{DetailCard, Page, Recommendation, SessionEvent, SessionState},
    services::{pages, providers::details_or_placeholder},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct FavouriteRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub state: SessionState,
}

#[derive(Debug, Serialize)]
pub struct FavouriteResponse {
    pub added: bool,
    pub favourites: Vec<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Titles for the movie selector
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<String>> {
    let titles = state
        .recommender
        .catalog()
        .titles()
        .map(String::from)
        .collect();
    Json(titles)
}

/// Ranked similar movies, without metadata
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(title): Path<String>,
    Query(params): Query<RecommendQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let k = params.k.unwrap_or(state.settings.recommendation_count);

    let recommendations = state.recommender.recommend(&title, k)?;

    tracing::info!(
        request_id = %request_id,
        title = %title,
        k = k,
        results = recommendations.len(),
        "Recommendations computed"
    );

    Ok(Json(recommendations))
}

/// Metadata card for any title, with placeholders for whatever is missing
pub async fn movie_details(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Json<DetailCard> {
    let details = details_or_placeholder(state.metadata.as_ref(), &title).await;
    Json(pages::detail_card(
        &title,
        details,
        &state.settings.placeholder_poster_url,
    ))
}

/// Start a new browsing session
pub async fn create_session(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    request: Option<Json<CreateSessionRequest>>,
) -> (StatusCode, Json<SessionResponse>) {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let seed = request.seed.unwrap_or_else(rand::random);

    let (session_id, session) = state.create_session(seed).await;

    tracing::info!(
        request_id = %request_id,
        session_id = %session_id,
        trending_seed = seed,
        "Session created"
    );

    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            state: session,
        }),
    )
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let session = state.session(session_id).await?;
    Ok(Json(SessionResponse {
        session_id,
        state: session,
    }))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.remove_session(session_id).await?;
    tracing::info!(session_id = %session_id, "Session ended");
    Ok(StatusCode::NO_CONTENT)
}

/// Render the session's current screen
pub async fn get_page(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(session_id): Path<Uuid>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Page>> {
    let session = state.session(session_id).await?;
    let seed = params.seed.unwrap_or(session.trending_seed);

    tracing::info!(
        request_id = %request_id,
        session_id = %session_id,
        screen = ?session.screen,
        "Rendering page"
    );

    let page = pages::render(
        &state.recommender,
        state.metadata.clone(),
        &state.settings,
        &session,
        seed,
    )
    .await?;

    Ok(Json(page))
}

/// Apply a navigation event to a session
pub async fn apply_event(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(session_id): Path<Uuid>,
    Json(event): Json<SessionEvent>,
) -> AppResult<Json<SessionResponse>> {
    // Unknown titles must not reach the recommendations screen
    if let SessionEvent::Recommend { title } = &event {
        state.recommender.catalog().index_of(title)?;
    }

    tracing::info!(
        request_id = %request_id,
        session_id = %session_id,
        event = ?event,
        "Applying session event"
    );

    let session = state
        .update_session(session_id, |session| {
            session.apply(event)?;
            Ok(session.clone())
        })
        .await?;

    Ok(Json(SessionResponse {
        session_id,
        state: session,
    }))
}

pub async fn add_favourite(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<FavouriteRequest>,
) -> AppResult<Json<FavouriteResponse>> {
    let response = state
        .update_session(session_id, |session| {
            let added = session.add_favourite(&request.title)?;
            Ok(FavouriteResponse {
                added,
                favourites: session.favourite_titles(),
            })
        })
        .await?;

    tracing::info!(
        session_id = %session_id,
        title = %request.title,
        added = response.added,
        "Favourite saved"
    );

    Ok(Json(response))
}

pub async fn remove_favourite(
    State(state): State<AppState>,
    Path((session_id, title)): Path<(Uuid, String)>,
) -> AppResult<StatusCode> {
    let removed = state
        .update_session(session_id, |session| Ok(session.remove_favourite(&title)))
        .await?;

    if !removed {
        return Err(AppError::NotFound(format!(
            "'{}' is not in the favourites",
            title
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
