//! Fallback orchestration
//!
//! Drives the upstream client through a candidate chain, strictly in order,
//! short-circuiting on the first outcome the endpoint's success predicate
//! accepts. Attempts are never parallelized: each is a paid network call
//! and the common case succeeds on the first one.

use crate::endpoint::SuccessPredicate;
use crate::resolver::Candidate;
use ariaclient::{Method, Outcome, UpstreamClient};
use std::time::Duration;
use tracing::{debug, warn};

/// Result of running a fallback chain to completion
#[derive(Debug, Clone, PartialEq)]
pub enum ChainResult {
    /// A candidate satisfied the endpoint's success predicate
    Satisfied(Outcome),
    /// Every candidate failed; carries the LAST candidate's outcome so
    /// callers can tell "every path came back not-found" from "every path
    /// errored"
    Exhausted(Outcome),
}

impl ChainResult {
    /// The outcome this chain settled on
    pub fn outcome(&self) -> &Outcome {
        match self {
            ChainResult::Satisfied(outcome) | ChainResult::Exhausted(outcome) => outcome,
        }
    }

    /// Consume the result and return its outcome
    pub fn into_outcome(self) -> Outcome {
        match self {
            ChainResult::Satisfied(outcome) | ChainResult::Exhausted(outcome) => outcome,
        }
    }

    /// Whether any candidate qualified
    pub fn is_satisfied(&self) -> bool {
        matches!(self, ChainResult::Satisfied(_))
    }
}

/// Execute a candidate chain against one upstream
///
/// Candidates are tried strictly in declared order with the endpoint's
/// timeout budget; the first outcome accepted by `predicate` stops the
/// chain. An empty chain is reported as exhausted.
pub async fn execute(
    client: &UpstreamClient,
    candidates: &[Candidate],
    method: Method,
    predicate: SuccessPredicate,
    budget: Option<Duration>,
) -> ChainResult {
    let mut last = Outcome::TransportError("empty candidate chain".to_string());

    for (position, candidate) in candidates.iter().enumerate() {
        let outcome = client.call(&candidate.path, method, budget).await;

        debug!(
            "candidate {}/{} {} ({:?}) -> {}",
            position + 1,
            candidates.len(),
            candidate.path,
            candidate.interpretation,
            outcome.classification()
        );

        if predicate.accepts(&outcome) {
            return ChainResult::Satisfied(outcome);
        }

        last = outcome;
    }

    warn!(
        "fallback chain exhausted after {} candidate(s): {}",
        candidates.len(),
        last.classification()
    );
    ChainResult::Exhausted(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::play_candidates;
    use serde_json::json;

    #[tokio::test]
    async fn test_short_circuits_on_first_success() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/playlists/abc123")
            .with_status(200)
            .with_body(r#"{"id":"abc123","tracks":[]}"#)
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/songs/abc123")
            .expect(0)
            .create_async()
            .await;

        let client = UpstreamClient::new(server.url()).unwrap();
        let result = execute(
            &client,
            &play_candidates("abc123"),
            Method::Get,
            SuccessPredicate::Default,
            None,
        )
        .await;

        first.assert_async().await;
        second.assert_async().await;
        assert!(result.is_satisfied());
        assert_eq!(
            result.into_outcome(),
            Outcome::Success(json!({"id": "abc123", "tracks": []}))
        );
    }

    #[tokio::test]
    async fn test_falls_through_to_next_candidate() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/playlists/abc123")
            .with_status(404)
            .create_async()
            .await;
        let song = server
            .mock("GET", "/songs/abc123")
            .with_status(200)
            .with_body(r#"{"id":"abc123","title":"Song"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = UpstreamClient::new(server.url()).unwrap();
        let result = execute(
            &client,
            &play_candidates("abc123"),
            Method::Get,
            SuccessPredicate::Default,
            None,
        )
        .await;

        song.assert_async().await;
        assert!(result.is_satisfied());
    }

    #[tokio::test]
    async fn test_exhaustion_carries_last_classification() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/playlists/abc123")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/songs/abc123")
            .with_status(404)
            .create_async()
            .await;

        let client = UpstreamClient::new(server.url()).unwrap();
        let result = execute(
            &client,
            &play_candidates("abc123"),
            Method::Get,
            SuccessPredicate::Default,
            None,
        )
        .await;

        // The last candidate 404'd, so the exhausted chain reports
        // not-found rather than the earlier server error.
        assert_eq!(result, ChainResult::Exhausted(Outcome::NotFound));
    }

    #[tokio::test]
    async fn test_empty_chain_is_exhausted() {
        let server = mockito::Server::new_async().await;
        let client = UpstreamClient::new(server.url()).unwrap();
        let result = execute(&client, &[], Method::Get, SuccessPredicate::Default, None).await;

        assert!(!result.is_satisfied());
        assert!(matches!(
            result.into_outcome(),
            Outcome::TransportError(_)
        ));
    }
}
