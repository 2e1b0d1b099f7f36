//! Per-track catalog enrichment
//!
//! Resolves an AI-suggested (title, artist) pair to the catalog's first
//! search hit and merges artwork, preview and storefront link. Failure for
//! one track degrades that track to null metadata; it never aborts a batch.

use super::{artwork, CatalogSearch};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use seedmix_common::{EnrichedTrack, SuggestedTrack};
use std::sync::Arc;

/// Attaches catalog metadata to suggested tracks
#[derive(Clone)]
pub struct Enricher {
    catalog: Arc<dyn CatalogSearch>,
}

impl Enricher {
    pub fn new(catalog: Arc<dyn CatalogSearch>) -> Self {
        Self { catalog }
    }

    /// Enrich a single suggestion
    ///
    /// The API's own relevance ranking is trusted: the first result wins,
    /// with no secondary scoring.
    pub async fn enrich(&self, suggested: SuggestedTrack) -> EnrichedTrack {
        let query = format!("{} {}", suggested.title, suggested.artist);

        let results = match self.catalog.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(
                    title = %suggested.title,
                    artist = %suggested.artist,
                    error = %e,
                    "Catalog lookup failed, keeping track without metadata"
                );
                return EnrichedTrack::without_metadata(suggested);
            }
        };

        let Some(best) = results.into_iter().next() else {
            tracing::debug!(
                title = %suggested.title,
                artist = %suggested.artist,
                "No catalog match, keeping track without metadata"
            );
            return EnrichedTrack::without_metadata(suggested);
        };

        let mut track = EnrichedTrack::without_metadata(suggested);
        track.artwork_url = artwork::upscale(best.artwork_url.as_deref());
        track.preview_url = best.preview_url;
        track.itunes_url = best.catalog_url;
        track
    }

    /// Enrich every suggestion concurrently, preserving input order
    ///
    /// With `concurrency = None` all lookups are issued at once and joined
    /// when every one has finished. `Some(n)` keeps at most `n` in flight.
    /// The output always has the same length as the input.
    pub async fn enrich_all(
        &self,
        suggestions: Vec<SuggestedTrack>,
        concurrency: Option<usize>,
    ) -> Vec<EnrichedTrack> {
        match concurrency {
            Some(limit) => {
                stream::iter(suggestions.into_iter().map(|s| self.enrich(s)))
                    .buffered(limit.max(1))
                    .collect()
                    .await
            }
            None => join_all(suggestions.into_iter().map(|s| self.enrich(s))).await,
        }
    }
}
