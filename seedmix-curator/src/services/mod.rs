//! External-facing services of the curation pipeline
//!
//! The catalog and the generation endpoint sit behind async traits so the
//! orchestrator and enricher can be driven by in-process stubs.

pub mod artwork;
pub mod catalog_client;
pub mod enricher;
pub mod generation_client;

pub use catalog_client::ItunesSearchClient;
pub use enricher::Enricher;
pub use generation_client::ProxyGenerationClient;

use crate::error::CuratorResult;
use async_trait::async_trait;
use seedmix_common::{CatalogEntry, GenerationRequest, SuggestedTrack};

/// Music catalog search
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search the catalog for `term`
    ///
    /// # Returns
    /// * `Ok(entries)` - hits in the catalog's relevance order (may be empty)
    /// * `Err(CuratorError::SearchFailed)` - transport, status or parse failure
    async fn search(&self, term: &str) -> CuratorResult<Vec<CatalogEntry>>;
}

/// Source of AI-suggested tracks
#[async_trait]
pub trait PlaylistGenerator: Send + Sync {
    /// Ask for suggestions matching the request's seeds and vibe
    ///
    /// # Returns
    /// * `Ok(tracks)` - suggestions in the order the model returned them
    /// * `Err(CuratorError::GenerationFailed)` - the cycle cannot continue
    async fn suggest(&self, request: &GenerationRequest) -> CuratorResult<Vec<SuggestedTrack>>;
}
