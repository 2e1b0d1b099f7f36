//! Chat completion backend used by the `/ai` handler

pub mod openai;

pub use openai::OpenAIBackend;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors from a completion backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    /// Non-2xx from the backend; `body` is the raw response body
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// Error details for the client: the backend's own JSON body when it
    /// sent one, otherwise the error message
    pub fn details(&self) -> Value {
        match self {
            BackendError::Api { body, .. } => serde_json::from_str(body)
                .unwrap_or_else(|_| Value::String(self.to_string())),
            other => Value::String(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Structured output constraint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonSchema { json_schema: JsonSchemaFormat },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: Value,
}

/// One completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub response_format: Option<ResponseFormat>,
}

/// A chat completion provider
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Model identifier, for logging and health
    fn model(&self) -> &str;

    /// Run the completion and return the text content of the first choice
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError>;
}
