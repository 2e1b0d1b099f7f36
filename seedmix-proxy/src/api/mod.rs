//! HTTP API handlers for seedmix-proxy

pub mod ai;
pub mod health;

pub use ai::ai_routes;
pub use health::health_routes;
