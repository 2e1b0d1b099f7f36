//! seedmix-curator - seed-to-playlist enrichment pipeline
//!
//! Collects user-selected seeds, asks the generation endpoint for suggested
//! tracks, resolves each suggestion against the catalog search API for
//! artwork/preview/link metadata, and exports the ordered result.

pub mod config;
pub mod error;
pub mod playlist;
pub mod services;
pub mod session;

pub use crate::config::CuratorConfig;
pub use crate::error::{CuratorError, CuratorResult};
pub use crate::playlist::{GenerateParams, PlaylistOrchestrator};
pub use crate::session::{Intent, SearchDebouncer, SeedStore, Session};

use crate::services::{CatalogSearch, Enricher, ItunesSearchClient, ProxyGenerationClient};
use seedmix_common::events::EventBus;
use std::sync::Arc;

/// Wire the HTTP clients, orchestrator and session from configuration
pub fn build_session(config: &CuratorConfig, event_bus: EventBus) -> CuratorResult<Session> {
    let catalog: Arc<dyn CatalogSearch> = Arc::new(ItunesSearchClient::new(
        &config.catalog_base_url,
        config.search_limit,
        config.request_timeout(),
    )?);
    let generator = Arc::new(ProxyGenerationClient::new(
        config.generation_url.clone(),
        config.request_timeout(),
    )?);

    let orchestrator = PlaylistOrchestrator::new(
        generator,
        Enricher::new(Arc::clone(&catalog)),
        event_bus.clone(),
    )
    .with_default_how_many(config.default_how_many)
    .with_enrichment_concurrency(config.enrichment_concurrency);

    Ok(Session::new(catalog, Arc::new(orchestrator), event_bus).with_debounce(config.debounce()))
}
