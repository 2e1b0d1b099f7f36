//! POST /ai - seed tracks in, suggested playlist out
//!
//! The response body is whatever JSON the model produced (normally
//! `{ "tracks": [...] }`), passed through after parsing. Shape validation
//! is the caller's job.

use axum::{extract::State, routing::post, Json, Router};
use seedmix_common::model::DEFAULT_HOW_MANY;
use seedmix_common::Seed;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::llm::{ChatMessage, CompletionRequest, JsonSchemaFormat, ResponseFormat};
use crate::AppState;

pub const SYSTEM_PROMPT: &str = "You are a music curator that returns only JSON.";

/// Request body; every field is optional
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRequest {
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

/// JSON schema the model output must follow
pub fn playlist_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "tracks": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "title": { "type": "string" },
                        "artist": { "type": "string" },
                        "reason": { "type": "string" },
                        "matchScore": { "type": "integer", "minimum": 0, "maximum": 100 }
                    },
                    // strict mode requires every property listed
                    "required": ["title", "artist", "reason", "matchScore"]
                }
            }
        },
        "required": ["tracks"]
    })
}

/// User prompt for one request
pub fn build_instructions(request: &AiRequest) -> String {
    let seeds = serde_json::to_string_pretty(&request.seed_tracks).unwrap_or_else(|_| "[]".into());
    let vibe = if request.vibe.is_empty() {
        "(none)"
    } else {
        request.vibe.as_str()
    };

    format!(
        "\nBased on these seed songs, suggest {} distinct songs that fit the same vibe.\n\
         - Use mainstream catalog so iTunes can find them.\n\
         - Prefer same/adjacent genres/eras unless 'vibe' says otherwise.\n\
         - Avoid duplicates of the seeds.\n\
         - Respect constraints (e.g., \"no explicit lyrics\", \"only 2010s\").\n\
         Return ONLY JSON that matches the provided JSON schema.\n\
         Seeds: {}\n\
         User vibe/constraints: {}.\n",
        request.how_many, seeds, vibe
    )
}

pub fn completion_request(request: &AiRequest) -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_instructions(request)),
        ],
        response_format: Some(ResponseFormat::JsonSchema {
            json_schema: JsonSchemaFormat {
                name: "playlist".to_string(),
                strict: true,
                schema: playlist_schema(),
            },
        }),
    }
}

/// Parse model output as JSON
///
/// Falls back to the span from the first `{` to the last `}` when the text
/// has prose around the object. Text with no such span yields an empty
/// track list.
pub fn parse_model_output(text: &str) -> ApiResult<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => serde_json::from_str(&text[start..=end])
            .map_err(|e| ApiError::MalformedOutput(e.to_string())),
        _ => Ok(json!({ "tracks": [] })),
    }
}

/// POST /ai
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<AiRequest>,
) -> ApiResult<Json<Value>> {
    info!(
        seeds = request.seed_tracks.len(),
        how_many = request.how_many,
        vibe = %request.vibe,
        "Playlist request"
    );

    let text = state.backend.complete(&completion_request(&request)).await?;
    let parsed = parse_model_output(&text)?;

    info!(
        tracks = parsed
            .get("tracks")
            .and_then(serde_json::Value::as_array)
            .map_or(0, Vec::len),
        "Playlist generated"
    );

    Ok(Json(parsed))
}

pub fn ai_routes() -> Router<AppState> {
    Router::new().route("/ai", post(generate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: Value) -> AiRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_request_defaults() {
        let req = request(json!({}));
        assert!(req.seed_tracks.is_empty());
        assert_eq!(req.how_many, 15);
        assert_eq!(req.vibe, "");
    }

    #[test]
    fn test_instructions_embed_count_seeds_and_vibe() {
        let req = request(json!({
            "seedTracks": [{"title": "Song A", "artist": "Artist A"}],
            "howMany": 2,
            "vibe": "only 2010s"
        }));
        let text = build_instructions(&req);

        assert!(text.contains("suggest 2 distinct songs"));
        assert!(text.contains("\"title\": \"Song A\""));
        assert!(text.contains("User vibe/constraints: only 2010s."));
        assert!(text.contains("Return ONLY JSON"));
    }

    #[test]
    fn test_instructions_without_vibe() {
        let text = build_instructions(&request(json!({})));
        assert!(text.contains("User vibe/constraints: (none)."));
        assert!(text.contains("Seeds: []"));
    }

    #[test]
    fn test_completion_request_shape() {
        let req = completion_request(&request(json!({})));
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].content, SYSTEM_PROMPT);
        match req.response_format {
            Some(ResponseFormat::JsonSchema { json_schema }) => {
                assert_eq!(json_schema.name, "playlist");
                assert!(json_schema.strict);
                assert_eq!(
                    json_schema.schema["properties"]["tracks"]["items"]["required"],
                    json!(["title", "artist", "reason", "matchScore"])
                );
            }
            None => panic!("missing response format"),
        }
    }

    #[test]
    fn test_parse_plain_json() {
        let value = parse_model_output(r#"{"tracks":[{"title":"X"}]}"#).unwrap();
        assert_eq!(value["tracks"][0]["title"], "X");
    }

    #[test]
    fn test_parse_extracts_embedded_block() {
        let text = "Sure! Here you go:\n```json\n{\"tracks\": [{\"title\": \"X\"}]}\n```";
        let value = parse_model_output(text).unwrap();
        assert_eq!(value["tracks"][0]["title"], "X");
    }

    #[test]
    fn test_parse_without_block_is_empty_playlist() {
        assert_eq!(
            parse_model_output("I cannot help with that.").unwrap(),
            json!({ "tracks": [] })
        );
        assert_eq!(parse_model_output("} backwards {").unwrap(), json!({ "tracks": [] }));
    }

    #[test]
    fn test_parse_broken_block_is_error() {
        let result = parse_model_output("prefix {\"tracks\": [} suffix");
        assert!(matches!(result, Err(ApiError::MalformedOutput(_))));
    }
}
