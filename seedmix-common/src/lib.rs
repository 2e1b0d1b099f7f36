//! # SeedMix Common Library
//!
//! Shared code for the SeedMix binaries including:
//! - Track, seed and playlist models (wire format of the generation endpoint)
//! - Event types (SeedmixEvent enum) and the EventBus
//! - Configuration file resolution and loading
//! - Common error type

pub mod config;
pub mod error;
pub mod events;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    CatalogEntry, EnrichedTrack, GenerationRequest, GenerationResponse, Playlist, Seed,
    SuggestedTrack,
};
