//! Playlist export
//!
//! Two portable formats: a pretty JSON array of enriched tracks and an
//! extended M3U. Both accept an empty playlist, although front ends are
//! expected to disable export until a playlist exists.

use seedmix_common::{EnrichedTrack, Playlist, Result};
use std::path::{Path, PathBuf};

pub const JSON_FILE_NAME: &str = "playlist.json";
pub const M3U_FILE_NAME: &str = "playlist.m3u";

/// Pretty-printed JSON array, fields in declaration order
pub fn to_json(playlist: &Playlist) -> Result<String> {
    Ok(serde_json::to_string_pretty(playlist)?)
}

/// Extended M3U text
///
/// Durations are always unknown (`-1`). The location line prefers the
/// preview URL, then the storefront URL, then a plain "artist - title".
pub fn to_m3u(playlist: &Playlist) -> String {
    let mut lines = Vec::with_capacity(1 + playlist.len() * 2);
    lines.push("#EXTM3U".to_string());

    for track in playlist {
        lines.push(format!("#EXTINF:-1,{}", track.label()));
        lines.push(location(track));
    }

    lines.join("\n")
}

fn location(track: &EnrichedTrack) -> String {
    track
        .preview_url
        .clone()
        .or_else(|| track.itunes_url.clone())
        .unwrap_or_else(|| track.label())
}

/// Write `playlist.json` and `playlist.m3u` into `dir`
///
/// Creates `dir` if missing. Returns the two written paths.
pub fn write_exports(playlist: &Playlist, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;

    let json_path = dir.join(JSON_FILE_NAME);
    std::fs::write(&json_path, to_json(playlist)?)?;

    let m3u_path = dir.join(M3U_FILE_NAME);
    std::fs::write(&m3u_path, to_m3u(playlist))?;

    tracing::info!(
        tracks = playlist.len(),
        json = %json_path.display(),
        m3u = %m3u_path.display(),
        "Playlist exported"
    );

    Ok((json_path, m3u_path))
}
