//! seedmix - command-line front end for the curator
//!
//! Search the catalog, pick seeds, generate an AI playlist and export it as
//! `playlist.json` / `playlist.m3u`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use seedmix_common::events::{EventBus, GenerationState, SeedmixEvent};
use seedmix_common::Seed;
use seedmix_curator::playlist::exporter;
use seedmix_curator::{build_session, CuratorConfig, GenerateParams, Intent};
use tracing::info;

/// Command-line arguments for seedmix
#[derive(Parser, Debug)]
#[command(name = "seedmix")]
#[command(about = "Seed-based AI playlist generator")]
#[command(version)]
struct Args {
    /// Config file (default: ~/.config/seedmix/curator.toml)
    #[arg(short, long, env = "SEEDMIX_CURATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog search API root
    #[arg(long)]
    catalog_url: Option<String>,

    /// Generation endpoint URL
    #[arg(long)]
    generation_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the catalog
    Search {
        /// Free-text search term
        #[arg(required = true)]
        term: Vec<String>,
    },

    /// Generate a playlist from seed songs
    Generate {
        /// Seed as "Title|Artist" (repeatable)
        #[arg(short, long = "seed", value_parser = parse_seed)]
        seeds: Vec<Seed>,

        /// Search term whose first catalog hit becomes a seed (repeatable)
        #[arg(short, long = "find")]
        find: Vec<String>,

        /// Number of tracks to ask for
        #[arg(short = 'n', long)]
        how_many: Option<i64>,

        /// Free-text vibe or constraints
        #[arg(short, long)]
        vibe: Option<String>,

        /// Directory to write playlist.json and playlist.m3u into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn parse_seed(value: &str) -> std::result::Result<Seed, String> {
    let (title, artist) = value
        .split_once('|')
        .ok_or_else(|| format!("expected \"Title|Artist\", got \"{}\"", value))?;
    let (title, artist) = (title.trim(), artist.trim());
    if title.is_empty() || artist.is_empty() {
        return Err(format!("title and artist are both required in \"{}\"", value));
    }
    Ok(Seed::new(title, artist))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seedmix_curator=info,warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = CuratorConfig::load(args.config.as_deref())?;
    if let Some(url) = args.catalog_url {
        config.catalog_base_url = url;
    }
    if let Some(url) = args.generation_url {
        config.generation_url = url;
    }

    info!("seedmix v{}", env!("CARGO_PKG_VERSION"));
    info!("Generation endpoint: {}", config.generation_url);

    let event_bus = EventBus::new(64);
    let session = build_session(&config, event_bus.clone())?;

    match args.command {
        Command::Search { term } => {
            let term = term.join(" ");
            let results = session
                .search(&term)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;

            if results.is_empty() {
                println!("No results.");
            }
            for (i, entry) in results.iter().enumerate() {
                println!("{}. {} - {}", i + 1, entry.title, entry.artist);
            }
        }

        Command::Generate {
            seeds,
            find,
            how_many,
            vibe,
            out,
        } => {
            for seed in seeds {
                session.dispatch(Intent::AddSeed(seed)).await?;
            }
            for term in find {
                let results = session
                    .search(&term)
                    .await
                    .with_context(|| format!("seed search for \"{}\"", term))?;
                match results.first() {
                    Some(entry) => {
                        info!("Seed from search: {} - {}", entry.title, entry.artist);
                        session.add_seed(Seed::from(entry)).await;
                    }
                    None => bail!("No catalog results for seed search \"{}\"", term),
                }
            }

            let status = tokio::spawn(print_status(event_bus.subscribe()));
            let result = session.generate(GenerateParams { how_many, vibe }).await;
            status.abort();

            let playlist = result.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            eprintln!("{}", status_line(GenerationState::Ready).unwrap_or_default());

            for (i, track) in playlist.iter().enumerate() {
                println!(
                    "{}. {} - {}  (match: {})",
                    i + 1,
                    track.title,
                    track.artist,
                    track.match_score
                );
                if !track.reason.is_empty() {
                    println!("   {}", track.reason);
                }
                if let Some(url) = &track.itunes_url {
                    println!("   {}", url);
                }
            }

            if let Some(dir) = out {
                if playlist.is_empty() {
                    bail!("Playlist is empty, nothing to export");
                }
                let (json_path, m3u_path) = exporter::write_exports(&playlist, &dir)?;
                println!("Wrote {} and {}", json_path.display(), m3u_path.display());
            }
        }
    }

    Ok(())
}

/// Progress text for a generation state
fn status_line(state: GenerationState) -> Option<&'static str> {
    match state {
        GenerationState::Requesting => Some("Asking AI for suggestions..."),
        GenerationState::Enriching => Some("Looking up tracks in the catalog..."),
        GenerationState::Ready => Some("Done."),
        GenerationState::Failed | GenerationState::Idle => None,
    }
}

/// Mirror in-flight generation progress onto stderr
///
/// Aborted once `generate` returns; the final line is printed by `main`.
async fn print_status(mut rx: tokio::sync::broadcast::Receiver<SeedmixEvent>) {
    while let Ok(event) = rx.recv().await {
        if let SeedmixEvent::GenerationStateChanged { new_state, .. } = event {
            if new_state.is_busy() {
                if let Some(line) = status_line(new_state) {
                    eprintln!("{}", line);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed() {
        let seed = parse_seed(" Song A | Artist A ").unwrap();
        assert_eq!(seed, Seed::new("Song A", "Artist A"));
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(status_line(GenerationState::Ready), Some("Done."));
        assert!(status_line(GenerationState::Requesting).is_some());
        assert!(status_line(GenerationState::Enriching).is_some());
        assert_eq!(status_line(GenerationState::Idle), None);
        assert_eq!(status_line(GenerationState::Failed), None);
    }

    #[test]
    fn test_parse_seed_rejects_missing_artist() {
        assert!(parse_seed("Song A").is_err());
        assert!(parse_seed("Song A|  ").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "seedmix",
            "generate",
            "--seed",
            "Song A|Artist A",
            "-n",
            "2",
            "--vibe",
            "late night",
        ])
        .unwrap();

        match args.command {
            Command::Generate { seeds, how_many, vibe, .. } => {
                assert_eq!(seeds.len(), 1);
                assert_eq!(how_many, Some(2));
                assert_eq!(vibe.as_deref(), Some("late night"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
