//! Generation-cycle type definitions

use serde::{Deserialize, Serialize};

/// State of the current generation cycle
///
/// `Idle → Requesting → Enriching → Ready`, or `Requesting → Failed`.
/// A new `generate` call moves `Ready`/`Failed` back to `Idle` and then
/// on to `Requesting`, publishing both transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum GenerationState {
    /// No cycle has started yet
    #[default]
    Idle,
    /// Waiting on the generation endpoint
    Requesting,
    /// Resolving suggested tracks against the catalog
    Enriching,
    /// Playlist replaced with the cycle's result
    Ready,
    /// Generation endpoint failed; previous playlist kept
    Failed,
}

impl GenerationState {
    /// Whether a cycle is in flight in this state
    pub fn is_busy(self) -> bool {
        matches!(self, GenerationState::Requesting | GenerationState::Enriching)
    }
}

impl std::fmt::Display for GenerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationState::Idle => write!(f, "Idle"),
            GenerationState::Requesting => write!(f, "Requesting"),
            GenerationState::Enriching => write!(f, "Enriching"),
            GenerationState::Ready => write!(f, "Ready"),
            GenerationState::Failed => write!(f, "Failed"),
        }
    }
}
