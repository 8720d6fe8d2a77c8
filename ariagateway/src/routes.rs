//! HTTP routes for the gateway
//!
//! One handler per logical endpoint, all sharing the same shape: validate
//! the caller's parameters, let the orchestrator drive the upstream client
//! through the endpoint's candidate chain, normalize the outcome, and
//! annotate the response with the endpoint's cache hint. Handlers never
//! raise upstream failures — the only error a caller can see is a missing
//! parameter, rejected before any upstream call.

use crate::cachehint::CacheHint;
use crate::endpoint::{CHARTS_REQUIRED_FIELDS, EXPLORE_REQUIRED_FIELDS, EndpointKind};
use crate::error::GatewayError;
use crate::normalize;
use crate::orchestrator::{self, ChainResult};
use crate::resolver::{self, Candidate};
use ariaclient::{Method, Outcome, UpstreamClient};
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header::CACHE_CONTROL};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared per-process state: the two upstream handles, fixed at startup
#[derive(Clone)]
pub struct GatewayState {
    pub music: Arc<UpstreamClient>,
    pub sponsor: Arc<UpstreamClient>,
}

/// Create the router with all gateway endpoints
pub fn create_router(state: GatewayState) -> Router {
    Router::new()
        // Discovery
        .route("/search", get(search_endpoint))
        .route("/search/suggestions", get(suggestions_endpoint))
        .route("/charts", get(charts_endpoint))
        .route("/explore", get(explore_endpoint))
        .route("/home", get(home_endpoint))
        .route("/top-playlists", get(top_playlists_endpoint))
        // Metadata
        .route("/song", get(song_endpoint))
        .route("/album", get(album_endpoint))
        .route("/artist", get(artist_endpoint))
        .route("/lyrics", get(lyrics_endpoint))
        // Resolution and playback
        .route("/play", get(play_endpoint))
        .route("/podcast", get(podcast_endpoint))
        .route("/stream", get(stream_endpoint))
        // Session
        .route("/queue", get(queue_endpoint).delete(queue_clear_endpoint))
        // Community skip-segment service
        .route("/highlight", get(highlight_endpoint))
        .with_state(state)
}

// ============ Query parameters ============

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocaleParams {
    pub country: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "forceRefresh")]
    pub force_refresh: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

// ============ Response wrapper ============

/// Normalized response plus its cache hint
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub cache_hint: CacheHint,
    pub body: Value,
}

impl Reply {
    fn new(kind: EndpointKind, status: StatusCode, body: Value) -> Self {
        Self {
            status,
            cache_hint: kind.spec().cache_hint,
            body,
        }
    }

    fn ok(kind: EndpointKind, body: impl Serialize) -> Self {
        Self::new(
            kind,
            StatusCode::OK,
            serde_json::to_value(body).unwrap_or(Value::Null),
        )
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let cacheable = self.status.is_success();
        let mut response = (self.status, Json(self.body)).into_response();

        // Failure responses must never be served stale.
        if cacheable {
            if let Ok(value) = HeaderValue::from_str(&self.cache_hint.header_value()) {
                response.headers_mut().insert(CACHE_CONTROL, value);
            }
        }

        response
    }
}

// ============ Handlers ============

pub async fn search_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<SearchParams>,
) -> Result<Reply, GatewayError> {
    let q = require(&params.q, "q")?;
    let path = with_query(
        "/search",
        &[
            ("q", Some(q.to_string())),
            ("limit", params.limit.map(|v| v.to_string())),
            ("offset", params.offset.map(|v| v.to_string())),
            ("filter", params.filter.clone()),
        ],
    );

    let result = run(&state.music, EndpointKind::Search, &[Candidate::verbatim(path)]).await;
    Ok(Reply::ok(EndpointKind::Search, normalize::search(&result)))
}

pub async fn suggestions_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<SuggestParams>,
) -> Result<Reply, GatewayError> {
    let q = require(&params.q, "q")?;
    let path = with_query("/search/suggestions", &[("q", Some(q.to_string()))]);

    let result = run(
        &state.music,
        EndpointKind::Suggestions,
        &[Candidate::verbatim(path)],
    )
    .await;
    Ok(Reply::ok(
        EndpointKind::Suggestions,
        normalize::suggestions(&result),
    ))
}

pub async fn charts_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<LocaleParams>,
) -> Result<Reply, GatewayError> {
    let path = with_query("/charts", &locale_pairs(&params));

    let result = run(&state.music, EndpointKind::Charts, &[Candidate::verbatim(path)]).await;
    Ok(Reply::ok(
        EndpointKind::Charts,
        normalize::shaped_object(&result, CHARTS_REQUIRED_FIELDS),
    ))
}

pub async fn explore_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<LocaleParams>,
) -> Result<Reply, GatewayError> {
    let path = with_query("/explore", &locale_pairs(&params));

    let result = run(&state.music, EndpointKind::Explore, &[Candidate::verbatim(path)]).await;
    Ok(Reply::ok(
        EndpointKind::Explore,
        normalize::shaped_object(&result, EXPLORE_REQUIRED_FIELDS),
    ))
}

pub async fn home_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<HomeParams>,
) -> Result<Reply, GatewayError> {
    let path = with_query("/home", &[("limit", params.limit.map(|v| v.to_string()))]);

    let result = run(&state.music, EndpointKind::Home, &[Candidate::verbatim(path)]).await;
    Ok(Reply::ok(
        EndpointKind::Home,
        normalize::record_list(&result),
    ))
}

pub async fn top_playlists_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<LocaleParams>,
) -> Result<Reply, GatewayError> {
    let path = with_query("/top-playlists", &locale_pairs(&params));

    let result = run(
        &state.music,
        EndpointKind::TopPlaylists,
        &[Candidate::verbatim(path)],
    )
    .await;
    Ok(Reply::ok(
        EndpointKind::TopPlaylists,
        normalize::record_list(&result),
    ))
}

pub async fn song_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<IdParams>,
) -> Result<Reply, GatewayError> {
    let id = require(&params.id, "id")?;
    let candidates = [Candidate::verbatim(format!("/songs/{}", id))];

    let result = run(&state.music, EndpointKind::Song, &candidates).await;
    Ok(passthrough_or_error(
        EndpointKind::Song,
        result,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to load song",
    ))
}

pub async fn album_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<IdParams>,
) -> Result<Reply, GatewayError> {
    let id = require(&params.id, "id")?;
    let candidates = [Candidate::verbatim(format!("/albums/{}", id))];

    let result = run(&state.music, EndpointKind::Album, &candidates).await;
    Ok(passthrough_or_error(
        EndpointKind::Album,
        result,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to load album",
    ))
}

pub async fn artist_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<IdParams>,
) -> Result<Reply, GatewayError> {
    let id = require(&params.id, "id")?;
    let candidates = [Candidate::verbatim(format!("/artists/{}", id))];

    let result = run(&state.music, EndpointKind::Artist, &candidates).await;
    Ok(passthrough_or_error(
        EndpointKind::Artist,
        result,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to load artist",
    ))
}

pub async fn lyrics_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<IdParams>,
) -> Result<Reply, GatewayError> {
    let id = require(&params.id, "id")?;
    let candidates = [Candidate::verbatim(format!("/lyrics/{}", id))];

    let result = run(&state.music, EndpointKind::Lyrics, &candidates).await;
    Ok(Reply::ok(EndpointKind::Lyrics, normalize::lyrics(&result)))
}

pub async fn play_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<IdParams>,
) -> Result<Reply, GatewayError> {
    let id = require(&params.id, "id")?;
    let candidates = resolver::play_candidates(id);

    let result = run(&state.music, EndpointKind::Play, &candidates).await;
    Ok(passthrough_or_error(
        EndpointKind::Play,
        result,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to resolve identifier",
    ))
}

pub async fn podcast_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<IdParams>,
) -> Result<Reply, GatewayError> {
    let id = require(&params.id, "id")?;
    let candidates = resolver::podcast_candidates(id);

    let result = run(&state.music, EndpointKind::Podcast, &candidates).await;

    let reply = match result {
        ChainResult::Satisfied(Outcome::Success(payload)) => {
            Reply::new(EndpointKind::Podcast, StatusCode::OK, payload)
        }
        // 404 is a definitive result for podcasts, not a retry trigger.
        ChainResult::Satisfied(Outcome::NotFound) => Reply::new(
            EndpointKind::Podcast,
            StatusCode::NOT_FOUND,
            normalize::error_body("Podcast not found"),
        ),
        _ => Reply::new(
            EndpointKind::Podcast,
            StatusCode::INTERNAL_SERVER_ERROR,
            normalize::error_body("Failed to load podcast"),
        ),
    };
    Ok(reply)
}

pub async fn stream_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<IdParams>,
) -> Result<Reply, GatewayError> {
    let id = require(&params.id, "id")?;
    let candidates = [Candidate::verbatim(format!("/songs/{}/stream", id))];

    let result = run(&state.music, EndpointKind::Stream, &candidates).await;
    // 503 rather than 500: a stream failure is worth retrying client-side.
    Ok(passthrough_or_error(
        EndpointKind::Stream,
        result,
        StatusCode::SERVICE_UNAVAILABLE,
        "Stream temporarily unavailable",
    ))
}

pub async fn queue_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<IdParams>,
) -> Result<Reply, GatewayError> {
    let id = require(&params.id, "id")?;
    let candidates = [Candidate::verbatim(format!("/queue/{}", id))];

    let result = run(&state.music, EndpointKind::Queue, &candidates).await;
    Ok(Reply::ok(EndpointKind::Queue, normalize::queue(&result)))
}

pub async fn queue_clear_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<IdParams>,
) -> Result<Reply, GatewayError> {
    let id = require(&params.id, "id")?;
    let candidates = [Candidate::verbatim(format!("/queue/{}", id))];

    let spec = EndpointKind::QueueClear.spec();
    let result = orchestrator::execute(
        &state.music,
        &candidates,
        Method::Delete,
        spec.predicate,
        spec.budget,
    )
    .await;

    // The upstream accepted the DELETE; echo the cleared identifier
    // regardless of whatever body it sent back.
    let reply = if result.is_satisfied() {
        Reply::new(
            EndpointKind::QueueClear,
            StatusCode::OK,
            json!({ "cleared": id }),
        )
    } else {
        Reply::new(
            EndpointKind::QueueClear,
            StatusCode::INTERNAL_SERVER_ERROR,
            normalize::error_body("Failed to clear queue"),
        )
    };
    Ok(reply)
}

pub async fn highlight_endpoint(
    State(state): State<GatewayState>,
    Query(params): Query<IdParams>,
) -> Result<Reply, GatewayError> {
    let id = require(&params.id, "id")?;
    let path = with_query(
        "/api/skipSegments",
        &[
            ("videoID", Some(id.to_string())),
            ("category", Some("poi_highlight".to_string())),
        ],
    );

    let result = run(&state.sponsor, EndpointKind::Highlight, &[Candidate::verbatim(path)]).await;
    Ok(Reply::ok(
        EndpointKind::Highlight,
        normalize::highlight(&result),
    ))
}

// ============ Helpers ============

/// Run a candidate chain with the endpoint's declared rules
async fn run(client: &UpstreamClient, kind: EndpointKind, candidates: &[Candidate]) -> ChainResult {
    let spec = kind.spec();
    orchestrator::execute(client, candidates, Method::Get, spec.predicate, spec.budget).await
}

/// Pass a satisfied payload through, or produce the endpoint's declared
/// failure shape — never the raw upstream error body
fn passthrough_or_error(
    kind: EndpointKind,
    result: ChainResult,
    failure_status: StatusCode,
    failure_message: &str,
) -> Reply {
    match result.into_outcome() {
        Outcome::Success(payload) => Reply::new(kind, StatusCode::OK, payload),
        _ => Reply::new(kind, failure_status, normalize::error_body(failure_message)),
    }
}

fn require<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, GatewayError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.as_str()),
        _ => Err(GatewayError::MissingParameter(name)),
    }
}

/// Append the present query pairs to an upstream path
fn with_query(path: &str, pairs: &[(&str, Option<String>)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    for (key, value) in pairs {
        if let Some(value) = value {
            serializer.append_pair(key, value);
            any = true;
        }
    }

    if any {
        format!("{}?{}", path, serializer.finish())
    } else {
        path.to_string()
    }
}

fn locale_pairs(params: &LocaleParams) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("country", params.country.clone()),
        ("language", params.language.clone()),
        (
            "force",
            params.force_refresh.filter(|f| *f).map(|_| "true".to_string()),
        ),
    ]
}
