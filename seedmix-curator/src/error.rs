//! Error types for the curator pipeline
//!
//! Enrichment never appears here: a failed or empty per-track lookup
//! degrades to null metadata inside the Enricher and is only logged.

use thiserror::Error;

/// Curator error taxonomy
#[derive(Debug, Error)]
pub enum CuratorError {
    /// Catalog endpoint unreachable, non-success status, or unparsable body
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// Generation endpoint unreachable, non-success status, or response missing `tracks`
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Generate attempted with an empty seed list
    #[error("Add at least one seed song first")]
    NoSeeds,

    /// A newer generation cycle started before this one finished; result discarded
    #[error("Generation cycle {0} superseded by a newer request")]
    Superseded(u64),

    /// Client construction or configuration problem
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CuratorError {
    /// Single status line shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            CuratorError::SearchFailed(_) => "Search failed".to_string(),
            CuratorError::GenerationFailed(_) => {
                "Something went wrong while generating the playlist".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type for curator operations
pub type CuratorResult<T> = Result<T, CuratorError>;
