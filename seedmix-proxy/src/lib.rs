//! seedmix-proxy library interface
//!
//! The `/ai` generation endpoint: turns seed tracks and a vibe into a
//! structured-output chat completion and returns the model's playlist JSON.

pub mod api;
pub mod config;
pub mod error;
pub mod llm;

pub use crate::config::ProxyConfig;
pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::llm::CompletionBackend;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn CompletionBackend>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Any origin may call the API; browser front ends are served from
/// elsewhere.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ai_routes())
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
