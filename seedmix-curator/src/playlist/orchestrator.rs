//! Playlist generation orchestrator
//!
//! Coordinates one generation cycle: ask the generation endpoint for
//! suggestions, enrich every suggestion concurrently, and replace the current
//! playlist with the ordered result.
//!
//! # State Progression
//! Idle → Requesting → Enriching → Ready
//! Idle → Requesting → Failed
//!
//! Every cycle is tagged with a monotonic number. Only the most recently
//! started cycle may move the state or replace the playlist; a cycle that
//! completes after a newer one started is discarded as superseded. There are
//! no retries at any transition.

use crate::error::{CuratorError, CuratorResult};
use crate::services::{Enricher, PlaylistGenerator};
use seedmix_common::events::{EventBus, GenerationState, SeedmixEvent};
use seedmix_common::model::DEFAULT_HOW_MANY;
use seedmix_common::{GenerationRequest, Playlist, Seed};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Parameters of a generate request as given by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateParams {
    /// Requested track count; absent, zero or negative means the default
    pub how_many: Option<i64>,
    /// Free-text preferences ("no explicit lyrics", "only 2010s", ...)
    pub vibe: Option<String>,
}

/// State visible to readers between cycles
#[derive(Debug, Default)]
struct CycleState {
    /// Number of the most recently started cycle (0 = none yet)
    latest_cycle: u64,
    state: GenerationState,
    playlist: Playlist,
}

/// Playlist orchestrator service
pub struct PlaylistOrchestrator {
    generator: Arc<dyn PlaylistGenerator>,
    enricher: Enricher,
    event_bus: EventBus,
    default_how_many: u32,
    enrichment_concurrency: Option<usize>,
    current: RwLock<CycleState>,
}

impl PlaylistOrchestrator {
    /// Create new orchestrator
    ///
    /// # Arguments
    /// * `generator` - Generation endpoint client
    /// * `enricher` - Catalog enrichment for suggested tracks
    /// * `event_bus` - Receives state transitions and finished playlists
    pub fn new(generator: Arc<dyn PlaylistGenerator>, enricher: Enricher, event_bus: EventBus) -> Self {
        Self {
            generator,
            enricher,
            event_bus,
            default_how_many: DEFAULT_HOW_MANY,
            enrichment_concurrency: None,
            current: RwLock::new(CycleState::default()),
        }
    }

    /// Track count used when a request gives none (must be non-zero)
    pub fn with_default_how_many(mut self, how_many: u32) -> Self {
        self.default_how_many = how_many.max(1);
        self
    }

    /// Cap on simultaneous enrichment lookups (`None` = no cap)
    pub fn with_enrichment_concurrency(mut self, limit: Option<usize>) -> Self {
        self.enrichment_concurrency = limit;
        self
    }

    pub async fn state(&self) -> GenerationState {
        self.current.read().await.state
    }

    /// Snapshot of the current playlist
    pub async fn playlist(&self) -> Playlist {
        self.current.read().await.playlist.clone()
    }

    /// Number of the most recently started cycle
    pub async fn latest_cycle(&self) -> u64 {
        self.current.read().await.latest_cycle
    }

    /// Normalize a user-supplied track count
    pub fn resolve_how_many(&self, how_many: Option<i64>) -> u32 {
        match how_many {
            Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => self.default_how_many,
        }
    }

    /// Run one generation cycle
    ///
    /// # Returns
    /// * `Ok(playlist)` - the cycle completed and its playlist is now current
    /// * `Err(NoSeeds)` - `seeds` was empty; no request was made
    /// * `Err(GenerationFailed)` - endpoint failure; previous playlist kept
    /// * `Err(Superseded)` - a newer cycle started first; result discarded
    pub async fn generate(
        &self,
        seeds: &[Seed],
        how_many: Option<i64>,
        vibe: Option<&str>,
    ) -> CuratorResult<Playlist> {
        if seeds.is_empty() {
            let err = CuratorError::NoSeeds;
            self.event_bus.emit_lossy(SeedmixEvent::GenerationFailed {
                cycle: None,
                message: err.user_message(),
                timestamp: chrono::Utc::now(),
            });
            return Err(err);
        }

        let request = GenerationRequest {
            seed_tracks: seeds.to_vec(),
            how_many: self.resolve_how_many(how_many),
            vibe: vibe.map(str::trim).unwrap_or_default().to_string(),
        };

        let cycle = self.start_cycle().await;

        tracing::info!(
            cycle,
            seeds = request.seed_tracks.len(),
            how_many = request.how_many,
            vibe = %request.vibe,
            "Generation cycle started"
        );

        let suggestions = match self.generator.suggest(&request).await {
            Ok(tracks) => tracks,
            Err(e) => {
                tracing::error!(cycle, error = %e, "Generation request failed");
                if self.transition(cycle, GenerationState::Failed).await {
                    self.event_bus.emit_lossy(SeedmixEvent::GenerationFailed {
                        cycle: Some(cycle),
                        message: e.user_message(),
                        timestamp: chrono::Utc::now(),
                    });
                }
                return Err(e);
            }
        };

        self.transition(cycle, GenerationState::Enriching).await;

        let suggested_count = suggestions.len();
        let tracks = self
            .enricher
            .enrich_all(suggestions, self.enrichment_concurrency)
            .await;
        debug_assert_eq!(tracks.len(), suggested_count);

        let matched = tracks
            .iter()
            .filter(|t| t.itunes_url.is_some() || t.preview_url.is_some())
            .count();
        let playlist = Playlist::new(tracks);

        let mut current = self.current.write().await;
        if current.latest_cycle != cycle {
            tracing::info!(
                cycle,
                latest = current.latest_cycle,
                "Discarding result of superseded generation cycle"
            );
            return Err(CuratorError::Superseded(cycle));
        }

        let old_state = current.state;
        current.playlist = playlist.clone();
        current.state = GenerationState::Ready;
        drop(current);

        tracing::info!(
            cycle,
            tracks = playlist.len(),
            matched,
            "Generation cycle complete"
        );

        self.emit_transition(cycle, old_state, GenerationState::Ready);
        self.event_bus.emit_lossy(SeedmixEvent::PlaylistReady {
            cycle,
            playlist: playlist.clone(),
            timestamp: chrono::Utc::now(),
        });

        Ok(playlist)
    }

    /// Register a new cycle and move to Requesting
    async fn start_cycle(&self) -> u64 {
        let mut current = self.current.write().await;
        current.latest_cycle += 1;
        let cycle = current.latest_cycle;
        let old_state = current.state;
        current.state = GenerationState::Requesting;
        drop(current);

        // A finished cycle resets to Idle before the next request
        let from = match old_state {
            GenerationState::Ready | GenerationState::Failed => {
                self.emit_transition(cycle, old_state, GenerationState::Idle);
                GenerationState::Idle
            }
            other => other,
        };
        self.emit_transition(cycle, from, GenerationState::Requesting);
        cycle
    }

    /// Move to `new_state` if `cycle` is still the latest; returns whether it did
    async fn transition(&self, cycle: u64, new_state: GenerationState) -> bool {
        let mut current = self.current.write().await;
        if current.latest_cycle != cycle {
            return false;
        }
        let old_state = current.state;
        current.state = new_state;
        drop(current);

        self.emit_transition(cycle, old_state, new_state);
        true
    }

    fn emit_transition(&self, cycle: u64, old_state: GenerationState, new_state: GenerationState) {
        tracing::debug!(cycle, %old_state, %new_state, "Generation state changed");
        self.event_bus.emit_lossy(SeedmixEvent::GenerationStateChanged {
            cycle,
            old_state,
            new_state,
            timestamp: chrono::Utc::now(),
        });
    }
}
