//! Error types for seedmix-proxy

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm::BackendError;

/// Message returned to clients for any failed generation
pub const GENERATION_FAILED: &str = "OpenAI request failed.";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Completion backend failed (500)
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Model output contained a JSON-looking block that did not parse (500)
    #[error("Unparsable model output: {0}")]
    MalformedOutput(String),
}

impl ApiError {
    fn details(&self) -> Value {
        match self {
            ApiError::Backend(err) => err.details(),
            ApiError::MalformedOutput(msg) => Value::String(msg.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Generation request failed");

        let body = Json(json!({
            "error": GENERATION_FAILED,
            "details": self.details(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
