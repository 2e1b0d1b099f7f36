//! User session: seed selection, search and generation behind one dispatch
//!
//! A front end never mutates curator state directly. It sends `Intent`s to
//! `Session::dispatch` and renders the `SeedmixEvent` snapshots published on
//! the event bus.

pub mod debouncer;
pub mod seed_store;

pub use debouncer::SearchDebouncer;
pub use seed_store::SeedStore;

use crate::error::CuratorResult;
use crate::playlist::{GenerateParams, PlaylistOrchestrator};
use crate::services::CatalogSearch;
use seedmix_common::events::{EventBus, SeedmixEvent};
use seedmix_common::{CatalogEntry, Playlist, Seed};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;

/// Default search-as-you-type quiet period
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// User intents accepted by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Run a catalog search (search button, not debounced)
    Search(String),
    /// Search-as-you-type keystroke; fires after the quiet period
    TypeSearch(String),
    AddSeed(Seed),
    /// Remove the seed at this position in the current list
    RemoveSeed(usize),
    Generate(GenerateParams),
}

/// Session-scoped curator state
pub struct Session {
    seeds: RwLock<SeedStore>,
    catalog: Arc<dyn CatalogSearch>,
    orchestrator: Arc<PlaylistOrchestrator>,
    event_bus: EventBus,
    debouncer: SearchDebouncer,
    generations_in_flight: AtomicUsize,
}

impl Session {
    pub fn new(
        catalog: Arc<dyn CatalogSearch>,
        orchestrator: Arc<PlaylistOrchestrator>,
        event_bus: EventBus,
    ) -> Self {
        let debouncer = SearchDebouncer::new(
            Arc::clone(&catalog),
            event_bus.clone(),
            Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        );
        Self {
            seeds: RwLock::new(SeedStore::new()),
            catalog,
            orchestrator,
            event_bus,
            debouncer,
            generations_in_flight: AtomicUsize::new(0),
        }
    }

    /// Replace the search-as-you-type quiet period
    pub fn with_debounce(mut self, quiet_period: Duration) -> Self {
        self.debouncer = SearchDebouncer::new(
            Arc::clone(&self.catalog),
            self.event_bus.clone(),
            quiet_period,
        );
        self
    }

    /// Apply one intent
    ///
    /// Outcomes are also published on the event bus; the returned error is
    /// for callers that need a status code (the CLI).
    pub async fn dispatch(&self, intent: Intent) -> CuratorResult<()> {
        match intent {
            Intent::Search(term) => self.search(&term).await.map(|_| ()),
            Intent::TypeSearch(term) => {
                self.search_as_you_type(term);
                Ok(())
            }
            Intent::AddSeed(seed) => {
                self.add_seed(seed).await;
                Ok(())
            }
            Intent::RemoveSeed(index) => {
                self.remove_seed(index).await;
                Ok(())
            }
            Intent::Generate(params) => self.generate(params).await.map(|_| ()),
        }
    }

    /// User-initiated catalog search
    ///
    /// Failure is reported as "Search failed" and leaves seeds and playlist
    /// untouched.
    pub async fn search(&self, term: &str) -> CuratorResult<Vec<CatalogEntry>> {
        let term = term.trim();
        match self.catalog.search(term).await {
            Ok(results) => {
                self.event_bus.emit_lossy(SeedmixEvent::SearchResults {
                    term: term.to_string(),
                    results: results.clone(),
                    timestamp: chrono::Utc::now(),
                });
                Ok(results)
            }
            Err(e) => {
                tracing::warn!(term = %term, error = %e, "Search failed");
                self.event_bus.emit_lossy(SeedmixEvent::SearchFailed {
                    term: term.to_string(),
                    message: e.user_message(),
                    timestamp: chrono::Utc::now(),
                });
                Err(e)
            }
        }
    }

    /// Debounced search; only the last keystroke within the quiet period
    /// reaches the catalog. Results arrive on the event bus.
    pub fn search_as_you_type(&self, term: impl Into<String>) -> JoinHandle<()> {
        self.debouncer.schedule(term)
    }

    /// Add a seed; duplicates are silently ignored
    pub async fn add_seed(&self, seed: Seed) -> bool {
        let mut seeds = self.seeds.write().await;
        let added = seeds.add(seed);
        if added {
            self.emit_seeds(&seeds);
        }
        added
    }

    /// Remove the seed at `index`; out-of-range is a no-op
    pub async fn remove_seed(&self, index: usize) -> Option<Seed> {
        let mut seeds = self.seeds.write().await;
        let removed = seeds.remove(index);
        if removed.is_some() {
            self.emit_seeds(&seeds);
        }
        removed
    }

    /// Current seeds in insertion order
    pub async fn seeds(&self) -> Vec<Seed> {
        self.seeds.read().await.list().to_vec()
    }

    /// Run a generation cycle from the current seeds
    pub async fn generate(&self, params: GenerateParams) -> CuratorResult<Playlist> {
        let seeds = self.seeds().await;

        self.generations_in_flight.fetch_add(1, Ordering::SeqCst);
        let _busy = BusyGuard(&self.generations_in_flight);

        self.orchestrator
            .generate(&seeds, params.how_many, params.vibe.as_deref())
            .await
    }

    /// Current playlist (empty before the first successful cycle)
    pub async fn playlist(&self) -> Playlist {
        self.orchestrator.playlist().await
    }

    /// Whether a generation is running
    ///
    /// Front ends should disable their generate action while busy. Overlap
    /// is still safe: the orchestrator discards superseded cycles.
    pub fn is_busy(&self) -> bool {
        self.generations_in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SeedmixEvent> {
        self.event_bus.subscribe()
    }

    fn emit_seeds(&self, seeds: &SeedStore) {
        self.event_bus.emit_lossy(SeedmixEvent::SeedsChanged {
            seeds: seeds.list().to_vec(),
            timestamp: chrono::Utc::now(),
        });
    }
}

/// Decrements the in-flight counter when a generation ends, however it ends
struct BusyGuard<'a>(&'a AtomicUsize);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
