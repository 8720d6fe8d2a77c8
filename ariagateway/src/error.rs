//! Gateway-side errors
//!
//! Only caller errors live here. Upstream failures are never raised — the
//! orchestrator and normalizer resolve them into well-formed response
//! bodies, so a handler can only fail before the first upstream call.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors a route handler can surface to the client
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A required query parameter is absent or empty
    ///
    /// Rejected before any upstream call is made.
    #[error("Missing {0} parameter")]
    MissingParameter(&'static str),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self {
            GatewayError::MissingParameter(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
