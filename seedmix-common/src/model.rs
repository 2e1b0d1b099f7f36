//! Track, seed and playlist models
//!
//! These types double as the JSON wire format spoken between the curator and
//! the generation proxy, and as the export format of `playlist.json`. Field
//! names are camelCase on the wire and field order is the declaration order.

use serde::{Deserialize, Deserializer, Serialize};

/// Number of tracks requested when the caller gives no usable count
pub const DEFAULT_HOW_MANY: u32 = 15;

/// A user-chosen track used as a taste anchor for generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seed {
    pub title: String,
    pub artist: String,
    /// Catalog track id, when the seed came from a catalog search
    ///
    /// Browser clients send the raw numeric `trackId`; both forms are read.
    #[serde(default, deserialize_with = "string_or_number")]
    pub itunes_id: Option<String>,
    #[serde(default)]
    pub artwork_url: Option<String>,
}

/// Read an optional id given as a JSON string or number
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    }))
}

impl Seed {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            itunes_id: None,
            artwork_url: None,
        }
    }

    /// Case-insensitive identity used for deduplication
    pub fn identity_key(&self) -> String {
        format!("{}|{}", self.title.to_lowercase(), self.artist.to_lowercase())
    }
}

impl From<&CatalogEntry> for Seed {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            itunes_id: Some(entry.catalog_id.clone()),
            artwork_url: entry.artwork_url.clone(),
        }
    }
}

/// A track proposed by the generation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedTrack {
    pub title: String,
    pub artist: String,
    /// Model-supplied explanation of the pick
    pub reason: String,
    /// Self-reported fit to the seeds/vibe, 0-100
    pub match_score: u8,
}

/// A suggested track with catalog metadata attached
///
/// Metadata fields are `None` when enrichment found no catalog match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTrack {
    pub title: String,
    pub artist: String,
    pub reason: String,
    pub match_score: u8,
    pub artwork_url: Option<String>,
    pub preview_url: Option<String>,
    pub itunes_url: Option<String>,
}

impl EnrichedTrack {
    /// Enriched track carrying no catalog metadata
    pub fn without_metadata(suggested: SuggestedTrack) -> Self {
        Self {
            title: suggested.title,
            artist: suggested.artist,
            reason: suggested.reason,
            match_score: suggested.match_score,
            artwork_url: None,
            preview_url: None,
            itunes_url: None,
        }
    }

    /// "Artist - Title" display label
    pub fn label(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

/// Ordered playlist produced by one generation cycle
///
/// Order is the order returned by the generation endpoint; it is never
/// re-sorted by match score. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Playlist {
    tracks: Vec<EnrichedTrack>,
}

impl Playlist {
    pub fn new(tracks: Vec<EnrichedTrack>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[EnrichedTrack] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedTrack> {
        self.tracks.iter()
    }
}

impl From<Vec<EnrichedTrack>> for Playlist {
    fn from(tracks: Vec<EnrichedTrack>) -> Self {
        Self::new(tracks)
    }
}

impl IntoIterator for Playlist {
    type Item = EnrichedTrack;
    type IntoIter = std::vec::IntoIter<EnrichedTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.into_iter()
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a EnrichedTrack;
    type IntoIter = std::slice::Iter<'a, EnrichedTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

/// Normalized catalog search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub title: String,
    pub artist: String,
    pub catalog_id: String,
    /// Thumbnail artwork (100px variant)
    pub artwork_url: Option<String>,
    pub preview_url: Option<String>,
    /// Storefront page for the track
    pub catalog_url: Option<String>,
}

/// Body of `POST /ai`
///
/// Every field is optional on input; missing fields take the documented
/// defaults (no seeds, 15 tracks, empty vibe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub seed_tracks: Vec<Seed>,
    #[serde(default = "default_how_many")]
    pub how_many: u32,
    #[serde(default)]
    pub vibe: String,
}

fn default_how_many() -> u32 {
    DEFAULT_HOW_MANY
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            seed_tracks: Vec::new(),
            how_many: DEFAULT_HOW_MANY,
            vibe: String::new(),
        }
    }
}

/// Successful response of `POST /ai`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub tracks: Vec<SuggestedTrack>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_key_is_case_insensitive() {
        let a = Seed::new("Song A", "Artist A");
        let b = Seed::new("SONG a", "artist A");
        assert_eq!(a.identity_key(), "song a|artist a");
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_seed_from_catalog_entry() {
        let entry = CatalogEntry {
            title: "Heroes".to_string(),
            artist: "David Bowie".to_string(),
            catalog_id: "1440790966".to_string(),
            artwork_url: Some("https://is1.example/100x100bb.jpg".to_string()),
            preview_url: None,
            catalog_url: None,
        };

        let seed = Seed::from(&entry);
        assert_eq!(seed.title, "Heroes");
        assert_eq!(seed.itunes_id.as_deref(), Some("1440790966"));
        assert_eq!(seed.artwork_url, entry.artwork_url);
    }

    #[test]
    fn test_seed_wire_format() {
        let seed = Seed::new("Song A", "Artist A");
        let value = serde_json::to_value(&seed).unwrap();
        assert_eq!(
            value,
            json!({"title": "Song A", "artist": "Artist A", "itunesId": null, "artworkUrl": null})
        );

        // Front ends may send seeds without the optional fields
        let parsed: Seed = serde_json::from_value(json!({"title": "X", "artist": "Y"})).unwrap();
        assert_eq!(parsed, Seed::new("X", "Y"));
    }

    #[test]
    fn test_seed_numeric_itunes_id() {
        let parsed: Seed = serde_json::from_value(json!({
            "title": "Dreams",
            "artist": "Fleetwood Mac",
            "itunesId": 1440794713u64
        }))
        .unwrap();
        assert_eq!(parsed.itunes_id.as_deref(), Some("1440794713"));

        let parsed: Seed = serde_json::from_value(json!({
            "title": "Dreams",
            "artist": "Fleetwood Mac",
            "itunesId": null
        }))
        .unwrap();
        assert_eq!(parsed.itunes_id, None);

        // Always written back as a string
        let value = serde_json::to_value(Seed {
            itunes_id: Some("1440794713".to_string()),
            ..Seed::new("Dreams", "Fleetwood Mac")
        })
        .unwrap();
        assert_eq!(value["itunesId"], "1440794713");
    }

    #[test]
    fn test_generation_request_defaults() {
        let request: GenerationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.seed_tracks.is_empty());
        assert_eq!(request.how_many, 15);
        assert_eq!(request.vibe, "");
    }

    #[test]
    fn test_generation_response_requires_tracks() {
        let missing = serde_json::from_str::<GenerationResponse>(r#"{"songs": []}"#);
        assert!(missing.is_err());

        let parsed: GenerationResponse = serde_json::from_value(json!({
            "tracks": [{"title": "Song B", "artist": "Artist B", "reason": "similar tempo", "matchScore": 80}]
        }))
        .unwrap();
        assert_eq!(parsed.tracks[0].match_score, 80);
    }

    #[test]
    fn test_enriched_track_field_order() {
        let track = EnrichedTrack::without_metadata(SuggestedTrack {
            title: "T".to_string(),
            artist: "A".to_string(),
            reason: "r".to_string(),
            match_score: 50,
        });
        let text = serde_json::to_string(&track).unwrap();
        assert_eq!(
            text,
            r#"{"title":"T","artist":"A","reason":"r","matchScore":50,"artworkUrl":null,"previewUrl":null,"itunesUrl":null}"#
        );
    }

    #[test]
    fn test_playlist_serializes_as_array() {
        let playlist = Playlist::default();
        assert_eq!(serde_json::to_string(&playlist).unwrap(), "[]");
        assert!(playlist.is_empty());
    }
}
