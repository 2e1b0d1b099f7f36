//! Playlist generation and export

pub mod exporter;
pub mod orchestrator;

pub use orchestrator::{GenerateParams, PlaylistOrchestrator};
