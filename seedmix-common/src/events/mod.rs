//! Event types for the SeedMix event system
//!
//! The curator core never talks to a presentation layer directly. It emits
//! state snapshots on the EventBus and any front end (CLI, web, TUI)
//! subscribes and renders them.

mod generation_types;

pub use generation_types::GenerationState;

use crate::model::{CatalogEntry, Playlist, Seed};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// SeedMix event types
///
/// Events are broadcast via EventBus and can be serialized for transmission
/// to a UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SeedmixEvent {
    /// Catalog search completed
    ///
    /// An empty result list means the term had no matches.
    SearchResults {
        /// Term the user searched for
        term: String,
        /// Normalized catalog hits, API relevance order
        results: Vec<CatalogEntry>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Catalog search failed; playlist state is unaffected
    SearchFailed {
        term: String,
        /// User-facing message ("Search failed")
        message: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Seed list changed (add or remove)
    SeedsChanged {
        /// Full seed list in insertion order
        seeds: Vec<Seed>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Generation cycle moved between states
    GenerationStateChanged {
        /// Monotonic cycle number
        cycle: u64,
        old_state: GenerationState,
        new_state: GenerationState,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A cycle completed and replaced the playlist
    PlaylistReady {
        cycle: u64,
        playlist: Playlist,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Generation aborted; previous playlist kept
    GenerationFailed {
        /// Cycle number, absent when the request was rejected before starting
        cycle: Option<u64>,
        /// Single user-facing status message
        message: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Broadcast channel for SeedmixEvent
///
/// Cloning an EventBus yields another handle to the same channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SeedmixEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before slow subscribers
    ///   start losing the oldest ones
    ///
    /// # Examples
    ///
    /// ```
    /// use seedmix_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<SeedmixEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: SeedmixEvent,
    ) -> Result<usize, broadcast::error::SendError<SeedmixEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: SeedmixEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
