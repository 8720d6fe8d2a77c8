//! Error types for the upstream client

/// Result type alias for client construction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building an [`UpstreamClient`]
///
/// Runtime failures never surface here: once a client is built, every
/// network exchange is classified into an [`Outcome`] variant instead of
/// being raised as an error.
///
/// [`UpstreamClient`]: crate::UpstreamClient
/// [`Outcome`]: crate::Outcome
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured base address is not a valid URL
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
