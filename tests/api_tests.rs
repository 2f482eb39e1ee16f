use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use movie_recommender::{
    api::{create_router, AppState},
    error::{AppError, AppResult},
    models::{MovieDetails, MovieRecord},
    services::{
        pages::PageSettings, providers::MetadataProvider, Catalog, Recommender, SimilarityMatrix,
    },
};

const PLACEHOLDER: &str = "https://placeholder.test/poster.png";

/// Knows posters for a couple of titles and fails for everything else
struct StubProvider;

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_details(&self, title: &str) -> AppResult<MovieDetails> {
        match title {
            "B" | "Inception" => Ok(MovieDetails {
                poster_url: Some(format!("https://posters.test/{}.jpg", title)),
                plot: Some(format!("The plot of {}.", title)),
                imdb_id: Some("tt1375666".to_string()),
                ..Default::default()
            }),
            _ => Err(AppError::ExternalApi("Movie not found!".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn create_test_server() -> TestServer {
    let titles = ["A", "B", "C", "D", "E", "F"];
    let catalog = Catalog::load(titles.iter().map(|t| MovieRecord::new(*t))).unwrap();
    let matrix = SimilarityMatrix::new(vec![
        vec![1.0, 0.9, 0.9, 0.5, 0.1, 0.0],
        vec![0.9, 1.0, 0.3, 0.3, 0.3, 0.2],
        vec![0.9, 0.3, 1.0, 0.4, 0.6, 0.1],
        vec![0.5, 0.3, 0.4, 1.0, 0.2, 0.7],
        vec![0.1, 0.3, 0.6, 0.2, 1.0, 0.8],
        vec![0.0, 0.2, 0.1, 0.7, 0.8, 1.0],
    ]);
    let recommender = Recommender::new(Arc::new(catalog), Arc::new(matrix)).unwrap();

    let settings = PageSettings {
        recommendation_count: 5,
        trending_pool_size: 100,
        trending_sample_size: 4,
        popular_titles: vec!["Inception".to_string(), "Avatar".to_string()],
        placeholder_poster_url: PLACEHOLDER.to_string(),
    };

    let state = AppState::new(recommender, Arc::new(StubProvider), settings);
    TestServer::new(create_router(state)).unwrap()
}

async fn create_session(server: &TestServer, seed: u64) -> String {
    let response = server.post("/api/v1/sessions").json(&json!({ "seed": seed })).await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_header() {
    let server = create_test_server();

    let response = server.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));

    let id = "0b6f4a6e-55a4-4a4e-9d55-8a1b0b7b6f0e";
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.headers()["x-request-id"], id);
}

#[tokio::test]
async fn test_list_movies() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();
    let movies: Vec<String> = response.json();
    assert_eq!(movies, vec!["A", "B", "C", "D", "E", "F"]);
}

#[tokio::test]
async fn test_recommendations() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies/A/recommendations").await;
    response.assert_status_ok();

    let recs: Vec<Value> = response.json();
    let titles: Vec<&str> = recs.iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["B", "C", "D", "E", "F"]);
}

#[tokio::test]
async fn test_recommendations_capped_at_catalog() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/movies/A/recommendations")
        .add_query_param("k", 10)
        .await;
    response.assert_status_ok();
    let recs: Vec<Value> = response.json();
    assert_eq!(recs.len(), 5);
}

#[tokio::test]
async fn test_recommendations_errors() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/Z/recommendations").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .get("/api/v1/movies/A/recommendations")
        .add_query_param("k", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_movie_details_with_fallback() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/B/details").await;
    response.assert_status_ok();
    let card: Value = response.json();
    assert_eq!(card["poster_url"], "https://posters.test/B.jpg");
    assert_eq!(card["director"], "N/A");
    assert_eq!(card["imdb_url"], "https://www.imdb.com/title/tt1375666");

    // Metadata failures degrade instead of erroring
    let response = server.get("/api/v1/movies/C/details").await;
    response.assert_status_ok();
    let card: Value = response.json();
    assert_eq!(card["poster_url"], PLACEHOLDER);
    assert_eq!(card["plot"], "N/A");
    assert!(card["imdb_url"].is_null());
}

#[tokio::test]
async fn test_session_lifecycle() {
    let server = create_test_server();

    // Sessions can be created without a body
    let response = server.post("/api/v1/sessions").await;
    response.assert_status(StatusCode::CREATED);

    let session_id = create_session(&server, 3).await;

    let response = server.get(&format!("/api/v1/sessions/{}", session_id)).await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["screen"]["name"], "main");
    assert_eq!(session["trending_seed"], 3);

    let response = server
        .delete(&format!("/api/v1/sessions/{}", session_id))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/v1/sessions/{}", session_id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_navigation_flow() {
    let server = create_test_server();
    let session_id = create_session(&server, 11).await;
    let events = format!("/api/v1/sessions/{}/events", session_id);
    let page = format!("/api/v1/sessions/{}/page", session_id);

    // Main page
    let response = server.get(&page).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["screen"], "main");
    assert_eq!(body["movies"].as_array().unwrap().len(), 6);
    assert_eq!(body["popular"][0]["poster_url"], "https://posters.test/Inception.jpg");
    assert_eq!(body["popular"][1]["poster_url"], PLACEHOLDER);

    // Recommend
    let response = server
        .post(&events)
        .json(&json!({ "action": "recommend", "title": "A" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["screen"]["name"], "recommendations");

    let body: Value = server.get(&page).await.json();
    assert_eq!(body["screen"], "recommendations");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 5);
    assert_eq!(body["recommendations"][0]["title"], "B");
    assert!(body["trending"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["title"] != "A"));

    // Open a result, then go back to the same recommendations
    server
        .post(&events)
        .json(&json!({ "action": "select", "title": "B" }))
        .await
        .assert_status_ok();

    let body: Value = server.get(&page).await.json();
    assert_eq!(body["screen"], "detail");
    assert_eq!(body["card"]["title"], "B");
    assert_eq!(body["is_favourite"], false);

    let response = server.post(&events).json(&json!({ "action": "back" })).await;
    let body: Value = response.json();
    assert_eq!(body["screen"]["name"], "recommendations");
    assert_eq!(body["screen"]["query"], "A");
}

#[tokio::test]
async fn test_invalid_events() {
    let server = create_test_server();
    let session_id = create_session(&server, 1).await;
    let events = format!("/api/v1/sessions/{}/events", session_id);

    let response = server.post(&events).json(&json!({ "action": "back" })).await;
    response.assert_status(StatusCode::CONFLICT);

    let response = server
        .post(&events)
        .json(&json!({ "action": "recommend", "title": "Unknown" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    // Nothing above moved the session
    let session: Value = server
        .get(&format!("/api/v1/sessions/{}", session_id))
        .await
        .json();
    assert_eq!(session["screen"]["name"], "main");
}

#[tokio::test]
async fn test_page_is_reproducible_for_seed() {
    let server = create_test_server();
    let session_id = create_session(&server, 5).await;
    let page = format!("/api/v1/sessions/{}/page", session_id);

    let first: Value = server.get(&page).add_query_param("seed", 99).await.json();
    let second: Value = server.get(&page).add_query_param("seed", 99).await.json();
    assert_eq!(first["trending"], second["trending"]);
    assert_eq!(first["trending"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_favourites() {
    let server = create_test_server();
    let session_id = create_session(&server, 1).await;
    let favourites = format!("/api/v1/sessions/{}/favourites", session_id);

    let response = server.post(&favourites).json(&json!({ "title": "B" })).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["added"], true);

    let body: Value = server
        .post(&favourites)
        .json(&json!({ "title": "B" }))
        .await
        .json();
    assert_eq!(body["added"], false);
    assert_eq!(body["favourites"], json!(["B"]));

    server
        .post(&format!("/api/v1/sessions/{}/events", session_id))
        .json(&json!({ "action": "show_favourites" }))
        .await
        .assert_status_ok();

    let body: Value = server
        .get(&format!("/api/v1/sessions/{}/page", session_id))
        .await
        .json();
    assert_eq!(body["screen"], "favourites");
    assert_eq!(body["favourites"][0]["title"], "B");
    assert_eq!(body["favourites"][0]["poster_url"], "https://posters.test/B.jpg");

    let response = server.delete(&format!("{}/B", favourites)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.delete(&format!("{}/B", favourites)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_session() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/sessions/00000000-0000-4000-8000-000000000000/page")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
