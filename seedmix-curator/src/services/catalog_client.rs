//! iTunes Search API client
//!
//! Queries the public catalog search endpoint (no key needed) and normalizes
//! hits into `CatalogEntry`. One best-effort attempt per call: no retries, no
//! rate limiting, no caching.

use super::CatalogSearch;
use crate::error::{CuratorError, CuratorResult};
use async_trait::async_trait;
use seedmix_common::CatalogEntry;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("SeedMix/", env!("CARGO_PKG_VERSION"));

/// iTunes search response envelope
#[derive(Debug, Deserialize)]
struct ItunesSearchResponse {
    #[serde(default)]
    results: Vec<ItunesTrack>,
}

#[derive(Debug, Deserialize)]
struct ItunesTrack {
    #[serde(rename = "trackName")]
    track_name: Option<String>,
    #[serde(rename = "artistName")]
    artist_name: Option<String>,
    #[serde(rename = "trackId")]
    track_id: Option<u64>,
    #[serde(rename = "artworkUrl100")]
    artwork_url_100: Option<String>,
    #[serde(rename = "previewUrl")]
    preview_url: Option<String>,
    #[serde(rename = "trackViewUrl")]
    track_view_url: Option<String>,
}

impl ItunesTrack {
    /// Entries without a title or artist cannot be shown or matched
    fn into_entry(self) -> Option<CatalogEntry> {
        Some(CatalogEntry {
            title: self.track_name?,
            artist: self.artist_name?,
            catalog_id: self.track_id.map(|id| id.to_string()).unwrap_or_default(),
            artwork_url: self.artwork_url_100.filter(|u| !u.is_empty()),
            preview_url: self.preview_url.filter(|u| !u.is_empty()),
            catalog_url: self.track_view_url.filter(|u| !u.is_empty()),
        })
    }
}

/// Catalog search client backed by the iTunes Search API
pub struct ItunesSearchClient {
    http_client: reqwest::Client,
    search_url: String,
    limit: usize,
}

impl ItunesSearchClient {
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://itunes.apple.com`
    /// * `limit` - results per search (already validated, ≤ 8)
    /// * `timeout` - per-request timeout
    pub fn new(base_url: &str, limit: usize, timeout: Duration) -> CuratorResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CuratorError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            search_url: format!("{}/search", base_url.trim_end_matches('/')),
            limit,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[async_trait]
impl CatalogSearch for ItunesSearchClient {
    async fn search(&self, term: &str) -> CuratorResult<Vec<CatalogEntry>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(term = %term, url = %self.search_url, "Querying catalog search");

        let limit = self.limit.to_string();
        let response = self
            .http_client
            .get(&self.search_url)
            .query(&[
                ("term", term),
                ("entity", "musicTrack"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CuratorError::SearchFailed(format!("network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CuratorError::SearchFailed(format!(
                "catalog returned {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let body: ItunesSearchResponse = response
            .json()
            .await
            .map_err(|e| CuratorError::SearchFailed(format!("parse error: {}", e)))?;

        let mut entries: Vec<CatalogEntry> = body
            .results
            .into_iter()
            .filter_map(ItunesTrack::into_entry)
            .collect();
        entries.truncate(self.limit);

        tracing::debug!(term = %term, results = entries.len(), "Catalog search complete");

        Ok(entries)
    }
}
