//! Shared test helpers: in-process stub servers for the catalog search API
//! and the generation endpoint, plus trait-level stubs.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use seedmix_common::{CatalogEntry, GenerationRequest, SuggestedTrack};
use seedmix_curator::services::CatalogSearch;
use seedmix_curator::{CuratorError, CuratorResult};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Serve `router` on an ephemeral localhost port, returning its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// One raw iTunes search hit
pub fn itunes_hit(title: &str, artist: &str, id: u64) -> Value {
    json!({
        "trackName": title,
        "artistName": artist,
        "trackId": id,
        "artworkUrl100": format!("https://is1.example/{}/100x100bb.jpg", id),
        "previewUrl": format!("https://audio.example/{}.m4a", id),
        "trackViewUrl": format!("https://music.example/track/{}", id),
    })
}

/// Catalog stub behaviour, keyed by exact search term
#[derive(Default)]
pub struct CatalogStub {
    /// term → raw `results` array
    pub results: HashMap<String, Vec<Value>>,
    /// terms answered with HTTP 500
    pub failing: Vec<String>,
    /// terms answered with a non-JSON body
    pub garbled: Vec<String>,
    /// every query string received
    pub queries: Mutex<Vec<HashMap<String, String>>>,
}

async fn catalog_search(
    State(stub): State<Arc<CatalogStub>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    stub.queries.lock().unwrap().push(params.clone());
    let term = params.get("term").cloned().unwrap_or_default();

    if stub.failing.contains(&term) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable").into_response();
    }
    if stub.garbled.contains(&term) {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }

    let results = stub.results.get(&term).cloned().unwrap_or_default();
    Json(json!({ "resultCount": results.len(), "results": results })).into_response()
}

/// Start a catalog stub; returns (base URL, stub handle)
pub async fn spawn_catalog(stub: CatalogStub) -> (String, Arc<CatalogStub>) {
    let stub = Arc::new(stub);
    let router = Router::new()
        .route("/search", get(catalog_search))
        .with_state(Arc::clone(&stub));
    (spawn_server(router).await, stub)
}

/// Generation stub behaviour
pub struct GenerationStub {
    pub status: StatusCode,
    pub body: Value,
    /// every request body received
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl GenerationStub {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "error": "OpenAI request failed.", "details": "boom" }),
            requests: Mutex::new(Vec::new()),
        }
    }
}

async fn generate(
    State(stub): State<Arc<GenerationStub>>,
    Json(request): Json<GenerationRequest>,
) -> Response {
    stub.requests.lock().unwrap().push(request);
    (stub.status, Json(stub.body.clone())).into_response()
}

/// Start a generation stub; returns (`/ai` URL, stub handle)
pub async fn spawn_generation(stub: GenerationStub) -> (String, Arc<GenerationStub>) {
    let stub = Arc::new(stub);
    let router = Router::new()
        .route("/ai", post(generate))
        .with_state(Arc::clone(&stub));
    (format!("{}/ai", spawn_server(router).await), stub)
}

pub fn suggested(title: &str, artist: &str, reason: &str, score: u8) -> SuggestedTrack {
    SuggestedTrack {
        title: title.to_string(),
        artist: artist.to_string(),
        reason: reason.to_string(),
        match_score: score,
    }
}

/// Trait-level catalog stub: fixed entries per term, transport errors for others
#[derive(Default)]
pub struct MapCatalog {
    pub entries: HashMap<String, Vec<CatalogEntry>>,
    pub broken: Vec<String>,
}

#[async_trait]
impl CatalogSearch for MapCatalog {
    async fn search(&self, term: &str) -> CuratorResult<Vec<CatalogEntry>> {
        if self.broken.iter().any(|t| t == term) {
            return Err(CuratorError::SearchFailed(
                "network error: connection reset".to_string(),
            ));
        }
        Ok(self.entries.get(term).cloned().unwrap_or_default())
    }
}

pub fn entry(title: &str, artist: &str, id: &str) -> CatalogEntry {
    CatalogEntry {
        title: title.to_string(),
        artist: artist.to_string(),
        catalog_id: id.to_string(),
        artwork_url: Some(format!("https://is1.example/{}/100x100bb.jpg", id)),
        preview_url: Some(format!("https://audio.example/{}.m4a", id)),
        catalog_url: Some(format!("https://music.example/track/{}", id)),
    }
}
