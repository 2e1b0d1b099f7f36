//! OpenAI-compatible chat completions backend
//!
//! Works with any service implementing `POST {base}/chat/completions`.

use super::{BackendError, ChatMessage, CompletionBackend, CompletionRequest, ResponseFormat};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Content used when the first choice carries no message text
const EMPTY_CONTENT: &str = "{}";

pub struct OpenAIBackend {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
}

impl OpenAIBackend {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .user_agent(concat!("seedmix-proxy/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAIBackend {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatRequest {
            model: &self.model,
            messages: &request.messages,
            response_format: request.response_format.as_ref(),
            temperature: self.temperature,
        };

        debug!(
            model = %self.model,
            message_count = request.messages.len(),
            "Sending completion request"
        );

        let mut builder = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else {
                BackendError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| EMPTY_CONTENT.to_string());

        debug!(length = content.len(), "Received completion");
        Ok(content)
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a ResponseFormat>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
