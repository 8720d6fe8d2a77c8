//! End-to-end handler tests against stubbed upstreams
//!
//! These drive the route handlers directly (extractors are plain tuple
//! structs) with mockito standing in for the music and skip-segment
//! upstreams, covering the gateway's declared contract: fallback order,
//! definitive not-found, normalization defaults and failure shapes.

use ariaclient::UpstreamClient;
use ariagateway::endpoint::EndpointKind;
use ariagateway::cachehint::CacheHint;
use ariagateway::routes::{
    GatewayState, IdParams, LocaleParams, SearchParams, charts_endpoint, highlight_endpoint,
    home_endpoint, play_endpoint, podcast_endpoint, queue_clear_endpoint, search_endpoint,
    song_endpoint, stream_endpoint,
};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

fn state_for(music: &mockito::ServerGuard, sponsor: &mockito::ServerGuard) -> GatewayState {
    GatewayState {
        music: Arc::new(UpstreamClient::new(music.url()).unwrap()),
        sponsor: Arc::new(UpstreamClient::new(sponsor.url()).unwrap()),
    }
}

#[tokio::test]
async fn test_search_defaults_missing_total_and_never_reslices() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    music
        .mock("GET", "/search?q=daft+punk&limit=2&offset=0")
        .with_status(200)
        .with_body(r#"{"results":[{"id":"a"},{"id":"b"},{"id":"c"}],"count":5,"hasMore":true}"#)
        .create_async()
        .await;

    let reply = search_endpoint(
        State(state_for(&music, &sponsor)),
        Query(SearchParams {
            q: Some("daft punk".to_string()),
            limit: Some(2),
            offset: Some(0),
            filter: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    // Upstream sliced; the gateway must not slice again, even though the
    // caller asked for limit=2.
    assert_eq!(reply.body["results"].as_array().unwrap().len(), 3);
    assert_eq!(reply.body["count"], json!(5));
    assert_eq!(reply.body["hasMore"], json!(true));
    assert_eq!(reply.body["total"], json!(0));
}

#[tokio::test]
async fn test_search_requires_query_parameter() {
    let music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;

    let result = search_endpoint(
        State(state_for(&music, &sponsor)),
        Query(SearchParams::default()),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_podcast_404_is_definitive_and_single_call() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    let mock = music
        .mock("GET", "/podcasts/missing123")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let reply = podcast_endpoint(
        State(state_for(&music, &sponsor)),
        Query(IdParams {
            id: Some("missing123".to_string()),
        }),
    )
    .await
    .unwrap();

    mock.assert_async().await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, json!({"error": "Podcast not found"}));
}

#[tokio::test]
async fn test_play_tries_stripped_playlist_first() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    let stripped = music
        .mock("GET", "/playlists/abc123")
        .with_status(200)
        .with_body(r#"{"id":"abc123","kind":"playlist"}"#)
        .expect(1)
        .create_async()
        .await;
    let verbatim = music
        .mock("GET", "/playlists/VLabc123")
        .expect(0)
        .create_async()
        .await;
    let song = music
        .mock("GET", "/songs/VLabc123")
        .expect(0)
        .create_async()
        .await;

    let reply = play_endpoint(
        State(state_for(&music, &sponsor)),
        Query(IdParams {
            id: Some("VLabc123".to_string()),
        }),
    )
    .await
    .unwrap();

    stripped.assert_async().await;
    verbatim.assert_async().await;
    song.assert_async().await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["kind"], json!("playlist"));
}

#[tokio::test]
async fn test_play_falls_back_to_song_lookup() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    music
        .mock("GET", "/playlists/abc123")
        .with_status(404)
        .create_async()
        .await;
    let song = music
        .mock("GET", "/songs/abc123")
        .with_status(200)
        .with_body(r#"{"id":"abc123","kind":"song"}"#)
        .expect(1)
        .create_async()
        .await;

    let reply = play_endpoint(
        State(state_for(&music, &sponsor)),
        Query(IdParams {
            id: Some("abc123".to_string()),
        }),
    )
    .await
    .unwrap();

    song.assert_async().await;
    assert_eq!(reply.body["kind"], json!("song"));
}

#[tokio::test]
async fn test_play_exhaustion_uses_declared_failure_shape() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    music
        .mock("GET", "/playlists/abc123")
        .with_status(500)
        .with_body("raw upstream explosion")
        .create_async()
        .await;
    music
        .mock("GET", "/songs/abc123")
        .with_status(500)
        .with_body("raw upstream explosion")
        .create_async()
        .await;

    let reply = play_endpoint(
        State(state_for(&music, &sponsor)),
        Query(IdParams {
            id: Some("abc123".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    // Declared failure shape, never a passthrough of the raw error body.
    assert_eq!(reply.body, json!({"error": "Failed to resolve identifier"}));
}

#[tokio::test]
async fn test_stream_failure_is_retryable_503() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    music
        .mock("GET", "/songs/abc123/stream")
        .with_status(500)
        .create_async()
        .await;

    let reply = stream_endpoint(
        State(state_for(&music, &sponsor)),
        Query(IdParams {
            id: Some("abc123".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(reply.body, json!({"error": "Stream temporarily unavailable"}));
    assert_eq!(reply.cache_hint, CacheHint::Bypass);
}

#[tokio::test]
async fn test_song_failure_is_500_with_error_shape() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    music
        .mock("GET", "/songs/gone")
        .with_status(404)
        .create_async()
        .await;

    let reply = song_endpoint(
        State(state_for(&music, &sponsor)),
        Query(IdParams {
            id: Some("gone".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.body, json!({"error": "Failed to load song"}));
}

#[tokio::test]
async fn test_charts_malformed_payload_yields_empty_fields() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    // 2xx but not the expected shape: the normalizer's defaults apply
    // instead of propagating garbage.
    music
        .mock("GET", "/charts?country=FR")
        .with_status(200)
        .with_body(r#"{"songs": "oops"}"#)
        .create_async()
        .await;

    let reply = charts_endpoint(
        State(state_for(&music, &sponsor)),
        Query(LocaleParams {
            country: Some("FR".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"songs": [], "artists": []}));
}

#[tokio::test]
async fn test_home_non_array_payload_is_empty_sequence() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    music
        .mock("GET", "/home")
        .with_status(200)
        .with_body(r#"{"sections": "not a list"}"#)
        .create_async()
        .await;

    let reply = home_endpoint(
        State(state_for(&music, &sponsor)),
        Query(Default::default()),
    )
    .await
    .unwrap();

    assert_eq!(reply.body, json!([]));
}

#[tokio::test]
async fn test_queue_clear_echoes_identifier() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    let mock = music
        .mock("DELETE", "/queue/session42")
        .with_status(200)
        .with_body(r#"{"whatever": "the upstream says"}"#)
        .expect(1)
        .create_async()
        .await;

    let reply = queue_clear_endpoint(
        State(state_for(&music, &sponsor)),
        Query(IdParams {
            id: Some("session42".to_string()),
        }),
    )
    .await
    .unwrap();

    mock.assert_async().await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"cleared": "session42"}));
    assert_eq!(reply.cache_hint, CacheHint::Bypass);
}

#[tokio::test]
async fn test_queue_clear_accepts_bodiless_204() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    // Upstream acceptance of the DELETE is the success criterion; no
    // confirming body is required.
    music
        .mock("DELETE", "/queue/session42")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let reply = queue_clear_endpoint(
        State(state_for(&music, &sponsor)),
        Query(IdParams {
            id: Some("session42".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"cleared": "session42"}));
}

#[tokio::test]
async fn test_highlight_uses_sponsor_upstream() {
    let music = mockito::Server::new_async().await;
    let mut sponsor = mockito::Server::new_async().await;
    let mock = sponsor
        .mock("GET", "/api/skipSegments?videoID=abc123&category=poi_highlight")
        .with_status(200)
        .with_body(r#"[{"segment":[12.0,12.0],"videoDuration":200,"votes":3}]"#)
        .expect(1)
        .create_async()
        .await;

    let reply = highlight_endpoint(
        State(state_for(&music, &sponsor)),
        Query(IdParams {
            id: Some("abc123".to_string()),
        }),
    )
    .await
    .unwrap();

    mock.assert_async().await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.body,
        json!({"found": true, "highlight": 12.0, "videoDuration": 200.0, "votes": 3})
    );
    assert_eq!(
        reply.cache_hint,
        EndpointKind::Highlight.spec().cache_hint
    );
}

#[tokio::test]
async fn test_highlight_not_found_shape() {
    let music = mockito::Server::new_async().await;
    let mut sponsor = mockito::Server::new_async().await;
    sponsor
        .mock("GET", "/api/skipSegments?videoID=abc123&category=poi_highlight")
        .with_status(404)
        .create_async()
        .await;

    let reply = highlight_endpoint(
        State(state_for(&music, &sponsor)),
        Query(IdParams {
            id: Some("abc123".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"highlight": null, "found": false}));
}

#[tokio::test]
async fn test_idempotent_responses_for_unchanged_upstream() {
    let mut music = mockito::Server::new_async().await;
    let sponsor = mockito::Server::new_async().await;
    music
        .mock("GET", "/search?q=x")
        .with_status(200)
        .with_body(r#"{"results":[{"id":"a"}],"count":1,"hasMore":false,"total":1}"#)
        .expect(2)
        .create_async()
        .await;

    let state = state_for(&music, &sponsor);
    let params = || {
        Query(SearchParams {
            q: Some("x".to_string()),
            ..Default::default()
        })
    };

    let first = search_endpoint(State(state.clone()), params()).await.unwrap();
    let second = search_endpoint(State(state), params()).await.unwrap();

    assert_eq!(
        serde_json::to_vec(&first.body).unwrap(),
        serde_json::to_vec(&second.body).unwrap()
    );
}
