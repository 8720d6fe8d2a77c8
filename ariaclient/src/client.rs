//! HTTP client for a single upstream base address
//!
//! This module provides the one mechanical piece of the gateway: issue one
//! GET or DELETE against a named upstream path and classify whatever comes
//! back. It never retries and holds no state beyond the connection pool —
//! fallback policy lives in the gateway's orchestrator.
//!
//! # Example
//!
//! ```no_run
//! use ariaclient::{Method, UpstreamClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UpstreamClient::builder()
//!         .base_url("https://music.example.org")
//!         .build()?;
//!
//!     let outcome = client.get("/charts?country=FR", None).await;
//!     println!("charts: {}", outcome.classification());
//!     Ok(())
//! }
//! ```

use crate::error::Result;
use crate::outcome::Outcome;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default ambient timeout for upstream requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "AriaGateway/0.1 (ariaclient)";

/// HTTP method supported by the gateway's upstream contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Delete,
}

/// Stateless client bound to one upstream base address
///
/// The client is cheap to clone (the inner `reqwest::Client` shares its
/// connection pool) and safe to use from any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a client with default settings for the given base address
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET to the given upstream path
    ///
    /// `budget` overrides the ambient transport timeout for this one call.
    pub async fn get(&self, path: &str, budget: Option<Duration>) -> Outcome {
        self.call(path, Method::Get, budget).await
    }

    /// Issue a DELETE to the given upstream path
    pub async fn delete(&self, path: &str) -> Outcome {
        self.call(path, Method::Delete, None).await
    }

    /// Perform exactly one upstream call and classify the result
    ///
    /// Classification:
    /// - 2xx with a parseable JSON body → [`Outcome::Success`]
    /// - 2xx with an unparseable body → [`Outcome::UpstreamError`] for GET;
    ///   a DELETE is acknowledged by acceptance alone, so it classifies as
    ///   [`Outcome::Success`] with a null payload
    /// - explicit 404 → [`Outcome::NotFound`]
    /// - any other non-2xx → [`Outcome::UpstreamError`]
    /// - budget exceeded → [`Outcome::Timeout`]
    /// - connection-level failure → [`Outcome::TransportError`]
    pub async fn call(&self, path: &str, method: Method, budget: Option<Duration>) -> Outcome {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        debug!("{:?} {}", method, url);

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Delete => self.client.delete(&url),
        };

        if let Some(budget) = budget {
            request = request.timeout(budget);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Self::classify_error(&url, e),
        };

        let status = response.status().as_u16();

        if status == 404 {
            debug!("{} -> 404 (not found)", url);
            return Outcome::NotFound;
        }

        if !response.status().is_success() {
            warn!("{} -> {}", url, status);
            return Outcome::UpstreamError { status };
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Self::classify_error(&url, e),
        };

        match serde_json::from_str(&text) {
            Ok(value) => Outcome::Success(value),
            // A 204 or other bodiless acknowledgement is all a DELETE needs.
            Err(_) if method == Method::Delete => {
                debug!("{} -> {} accepted without JSON body", url, status);
                Outcome::Success(serde_json::Value::Null)
            }
            Err(e) => {
                // A 2xx that does not parse is an upstream failure, not ours.
                warn!("{} -> {} with malformed JSON body: {}", url, status, e);
                Outcome::UpstreamError { status }
            }
        }
    }

    fn classify_error(url: &str, e: reqwest::Error) -> Outcome {
        if e.is_timeout() {
            warn!("{} -> timeout", url);
            Outcome::Timeout
        } else {
            warn!("{} -> transport error: {}", url, e);
            Outcome::TransportError(e.to_string())
        }
    }
}

/// Builder for configuring an UpstreamClient
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: String::new(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    ///
    /// Useful for sharing a connection pool between upstream handles.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the upstream base address
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the ambient transport timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<UpstreamClient> {
        // Validate the base address eagerly so misconfiguration fails at
        // startup instead of on the first inbound request.
        Url::parse(&self.base_url)?;

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout)
                .build()?,
        };

        Ok(UpstreamClient {
            client,
            base_url: self.base_url,
        })
    }
}
