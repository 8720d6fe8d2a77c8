//! Classified result of a single upstream exchange
//!
//! The client performs exactly one network call and folds whatever happened
//! into an [`Outcome`]. Deciding what an outcome *means* (retry, surface,
//! fall through to the next candidate) is entirely the caller's business.

use serde_json::Value;

/// Classified result of one upstream call
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx response with a parseable JSON body
    Success(Value),
    /// Explicit HTTP 404 — the upstream denies the resource exists
    NotFound,
    /// Any other non-2xx status, or a 2xx body that is not valid JSON
    UpstreamError { status: u16 },
    /// The call exceeded its timeout budget and was cancelled
    Timeout,
    /// Connection-level failure (DNS, refused, reset, ...)
    TransportError(String),
}

impl Outcome {
    /// Whether this outcome carries a usable payload
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The payload, if any
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the outcome and return the payload, if any
    pub fn into_payload(self) -> Option<Value> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Short label used in logs
    pub fn classification(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::NotFound => "not-found",
            Outcome::UpstreamError { .. } => "upstream-error",
            Outcome::Timeout => "timeout",
            Outcome::TransportError(_) => "transport-error",
        }
    }
}
