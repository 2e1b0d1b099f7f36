//! Generation endpoint client
//!
//! Posts the seed list to the `/ai` proxy and returns the suggested tracks.
//! Any non-2xx status, transport error or body without a `tracks` array is a
//! hard failure for the cycle.

use super::PlaylistGenerator;
use crate::error::{CuratorError, CuratorResult};
use async_trait::async_trait;
use seedmix_common::{GenerationRequest, GenerationResponse, SuggestedTrack};
use std::time::Duration;

const USER_AGENT: &str = concat!("SeedMix/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the generation proxy
pub struct ProxyGenerationClient {
    http_client: reqwest::Client,
    url: String,
}

impl ProxyGenerationClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> CuratorResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CuratorError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PlaylistGenerator for ProxyGenerationClient {
    async fn suggest(&self, request: &GenerationRequest) -> CuratorResult<Vec<SuggestedTrack>> {
        tracing::debug!(
            url = %self.url,
            seeds = request.seed_tracks.len(),
            how_many = request.how_many,
            "Requesting suggestions from generation endpoint"
        );

        let response = self
            .http_client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| CuratorError::GenerationFailed(format!("network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CuratorError::GenerationFailed(format!(
                "endpoint returned {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| CuratorError::GenerationFailed(format!("malformed response: {}", e)))?;

        tracing::info!(tracks = body.tracks.len(), "Generation endpoint returned suggestions");

        Ok(body.tracks)
    }
}
