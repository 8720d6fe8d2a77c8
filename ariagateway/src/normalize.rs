//! Response normalization
//!
//! Whatever the chosen upstream returned is reshaped into the gateway's
//! declared output contract. Missing data becomes empty containers or
//! sentinel nulls — the client never receives an absent field or a raw
//! upstream error body. Every function here is pure: the same chain result
//! always produces byte-identical output.

use crate::orchestrator::ChainResult;
use ariaclient::Outcome;
use serde::Serialize;
use serde_json::{Value, json};

/// Declared output shape of the search endpoint
///
/// Pagination is the upstream's sole authority: `results` is passed through
/// exactly as received, never re-sliced against the caller's limit/offset
/// (re-slicing an already-paginated result would silently truncate or
/// duplicate records).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub results: Vec<Value>,
    pub count: u64,
    pub has_more: bool,
    pub total: u64,
}

/// Declared output shape of the suggestions endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestions {
    pub suggestions: Vec<String>,
}

/// Declared output shape of the up-next queue endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Queue {
    pub tracks: Vec<Value>,
    pub count: u64,
}

/// Declared output shape of the lyrics endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lyrics {
    pub lyrics: Option<String>,
    pub source: Option<String>,
}

/// Declared output shape of the sponsor-highlight endpoint
///
/// A point of interest is modeled upstream as a zero-length segment; the
/// highlight is that segment's first boundary timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub found: bool,
    pub highlight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<i64>,
}

impl Highlight {
    fn none() -> Self {
        Self {
            found: false,
            highlight: None,
            video_duration: None,
            votes: None,
        }
    }
}

/// Fixed failure shape for error-terminal endpoints
pub fn error_body(message: &str) -> Value {
    json!({ "error": message })
}

/// Normalize a search outcome
///
/// Missing `results` → empty sequence, missing `count`/`total` → 0,
/// missing `hasMore` → false.
pub fn search(result: &ChainResult) -> SearchPage {
    let payload = result.outcome().payload();

    SearchPage {
        results: payload
            .and_then(|p| p.get("results"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        count: payload
            .and_then(|p| p.get("count"))
            .and_then(Value::as_u64)
            .unwrap_or(0),
        has_more: payload
            .and_then(|p| p.get("hasMore"))
            .and_then(Value::as_bool)
            .unwrap_or(false),
        total: payload
            .and_then(|p| p.get("total"))
            .and_then(Value::as_u64)
            .unwrap_or(0),
    }
}

/// Normalize a suggestions outcome
///
/// The upstream returns a flat sequence of arbitrary-typed elements; only
/// text-typed entries survive.
pub fn suggestions(result: &ChainResult) -> Suggestions {
    let suggestions = match result.outcome().payload().and_then(Value::as_array) {
        Some(elements) => elements
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    Suggestions { suggestions }
}

/// Normalize a list-shaped outcome (home, top playlists)
///
/// Anything that is not an array of records becomes an empty sequence —
/// never null, never the raw payload.
pub fn record_list(result: &ChainResult) -> Vec<Value> {
    match result.outcome().payload().and_then(Value::as_array) {
        Some(elements) if elements.iter().all(Value::is_object) => elements.clone(),
        _ => Vec::new(),
    }
}

/// Normalize a shape-checked object outcome (charts, explore)
///
/// The predicate already vetted the payload; on any failure the declared
/// field names come back as empty arrays so the client renders an empty
/// page instead of garbage.
pub fn shaped_object(result: &ChainResult, required_fields: &[&str]) -> Value {
    if result.is_satisfied() {
        if let Some(payload) = result.outcome().payload() {
            return payload.clone();
        }
    }

    let mut empty = serde_json::Map::new();
    for field in required_fields {
        empty.insert((*field).to_string(), Value::Array(Vec::new()));
    }
    Value::Object(empty)
}

/// Normalize an up-next queue outcome
pub fn queue(result: &ChainResult) -> Queue {
    let payload = result.outcome().payload();

    let tracks: Vec<Value> = payload
        .and_then(|p| p.get("tracks"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    // An absent count means the upstream did not slice; report what is
    // actually there.
    let count = payload
        .and_then(|p| p.get("count"))
        .and_then(Value::as_u64)
        .unwrap_or(tracks.len() as u64);

    Queue { tracks, count }
}

/// Normalize a lyrics outcome
///
/// Absent lyrics are a null field, not an error page.
pub fn lyrics(result: &ChainResult) -> Lyrics {
    let payload = result.outcome().payload();

    Lyrics {
        lyrics: payload
            .and_then(|p| p.get("lyrics"))
            .and_then(Value::as_str)
            .map(str::to_string),
        source: payload
            .and_then(|p| p.get("source"))
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Normalize a sponsor-highlight outcome
///
/// The skip-segment service returns a sequence of segment records; only
/// the first one matters. Empty sequence, not-found and failures all
/// collapse to the same "no highlight" shape.
pub fn highlight(result: &ChainResult) -> Highlight {
    let segments = match result.outcome().payload().and_then(Value::as_array) {
        Some(segments) => segments,
        None => return Highlight::none(),
    };

    let first = match segments.first() {
        Some(first) => first,
        None => return Highlight::none(),
    };

    let timestamp = first
        .get("segment")
        .and_then(Value::as_array)
        .and_then(|bounds| bounds.first())
        .and_then(Value::as_f64);

    match timestamp {
        Some(timestamp) => Highlight {
            found: true,
            highlight: Some(timestamp),
            video_duration: first.get("videoDuration").and_then(Value::as_f64),
            votes: first.get("votes").and_then(Value::as_i64),
        },
        None => Highlight::none(),
    }
}
