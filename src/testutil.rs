use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::Key;
use serde_json::json;
use tempfile::TempDir;

use crate::{AppState, config::Config, db, models::NewMovie, store::MovieStore, tmdb::TmdbClient};

pub const API_KEY: &str = "test-key";
pub const IMAGE_BASE: &str = "https://image.test/t/p/w500";
pub const DUNE_ID: i32 = 438631;
pub const NO_POSTER_ID: i32 = 1;
pub const MALFORMED_ID: i32 = 2;

pub struct MockTmdb {
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
}

/// Serves a tiny slice of the movie database API on a random local port.
pub async fn spawn_mock_tmdb() -> MockTmdb {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/search/movie", get(mock_search))
        .route("/movie/{id}", get(mock_details))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock provider");
    let addr = listener.local_addr().expect("mock provider address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock provider stopped");
    });

    MockTmdb { base_url: format!("http://{addr}"), hits }
}

async fn mock_search(
    State(hits): State<Arc<AtomicUsize>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    if params.get("api_key").map(String::as_str) != Some(API_KEY) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let query = params.get("query").map(|q| q.to_lowercase()).unwrap_or_default();
    let results = if query.contains("dune") {
        json!([
            {"id": DUNE_ID, "title": "Dune", "release_date": "2021-09-15", "poster_path": "/abc.jpg", "overview": "Spice."},
            {"id": 841, "title": "Dune", "release_date": "1984-12-14", "poster_path": null, "overview": "Older spice."}
        ])
    } else {
        json!([])
    };
    Json(json!({"page": 1, "results": results})).into_response()
}

async fn mock_details(
    State(hits): State<Arc<AtomicUsize>>,
    Path(id): Path<i32>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    if params.get("api_key").map(String::as_str) != Some(API_KEY) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match id {
        DUNE_ID => Json(json!({
            "id": DUNE_ID,
            "title": "Dune",
            "release_date": "2021-10-22",
            "overview": "Paul Atreides travels to Arrakis.",
            "poster_path": "/abc.jpg"
        }))
        .into_response(),
        NO_POSTER_ID => Json(json!({
            "id": NO_POSTER_ID,
            "title": "Lost Reel",
            "release_date": "",
            "overview": "No poster survives.",
            "poster_path": null
        }))
        .into_response(),
        MALFORMED_ID => Json(json!({"id": MALFORMED_ID, "overview": "Nameless."})).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"status_code": 34}))).into_response(),
    }
}

pub fn test_tmdb(base_url: &str) -> TmdbClient {
    TmdbClient::new(
        reqwest::Client::new(),
        API_KEY.to_string(),
        base_url.to_string(),
        IMAGE_BASE.to_string(),
    )
}

pub async fn test_store() -> (TempDir, MovieStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = database_url(&dir);
    let db = db::connect_and_migrate(&url).await.expect("test database");
    (dir, MovieStore::new(db))
}

pub async fn test_state(tmdb_base_url: &str) -> (TempDir, AppState) {
    let (dir, store) = test_store().await;
    let config = Config {
        addr: "127.0.0.1:0".parse().expect("socket address"),
        secret_key: "test-secret-test-secret-test-secret-0123".to_string(),
        tmdb_api_key: API_KEY.to_string(),
        tmdb_base_url: tmdb_base_url.to_string(),
        tmdb_image_base_url: IMAGE_BASE.to_string(),
        tmdb_timeout_secs: 5,
        database_url: database_url(&dir),
    };
    let key = Key::derive_from(config.secret_key.as_bytes());
    let tmdb = test_tmdb(tmdb_base_url);

    let state = AppState { config: Arc::new(config), store, tmdb: Arc::new(tmdb), key };
    (dir, state)
}

pub fn new_movie(title: &str) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year: "2001-01-01".to_string(),
        description: format!("About {title}."),
        img_url: format!("{IMAGE_BASE}/{}.jpg", title.to_lowercase()),
    }
}

fn database_url(dir: &TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("movies.db").display())
}
