//! seedmix-proxy - AI playlist generation endpoint
//!
//! Serves `POST /ai` and `GET /health`, forwarding generation requests to an
//! OpenAI-compatible chat completions API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use seedmix_proxy::llm::OpenAIBackend;
use seedmix_proxy::{AppState, ProxyConfig};
use tracing::{info, warn};

/// Command-line arguments for seedmix-proxy
#[derive(Parser, Debug)]
#[command(name = "seedmix-proxy")]
#[command(about = "AI playlist generation endpoint")]
#[command(version)]
struct Args {
    /// Config file (default: ~/.config/seedmix/proxy.toml)
    #[arg(short, long, env = "SEEDMIX_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seedmix_proxy=info,tower_http=info,warn".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ProxyConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.bind_addr.set_port(port);
    }

    info!("Starting seedmix-proxy v{}", env!("CARGO_PKG_VERSION"));
    match config.api_key_prefix() {
        Some(prefix) => info!("API key loaded. Prefix: {}", prefix),
        None => warn!("OPENAI_API_KEY not found"),
    }
    info!("Model: {} via {}", config.model, config.openai_base_url);

    let backend = OpenAIBackend::new(
        config.openai_base_url.clone(),
        config.model.clone(),
        config.temperature,
        config.api_key.clone(),
        config.request_timeout(),
    )?;

    let app = seedmix_proxy::build_router(AppState::new(Arc::new(backend)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
