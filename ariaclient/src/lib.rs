//! Upstream HTTP client for the Aria gateway
//!
//! This crate owns the one network-facing primitive of the gateway: issue a
//! single GET or DELETE against a named path of an upstream base address and
//! classify the result. It deliberately contains no business logic —
//! fallback chains, success predicates and response shaping all live in
//! `ariagateway`, which drives this client through candidate lists.
//!
//! # Design
//!
//! - **One call, one outcome**: [`UpstreamClient::call`] never retries and
//!   never raises; everything that can happen on the wire is folded into an
//!   [`Outcome`] variant (success, not-found, upstream-error, timeout,
//!   transport-error).
//! - **Scoped cancellation**: a per-call timeout budget aborts only that
//!   in-flight request and converts it into [`Outcome::Timeout`]; with no
//!   budget the ambient transport timeout applies.
//! - **Stateless**: the client holds a base address and a connection pool,
//!   nothing else. Any number of requests may use it concurrently.
//!
//! # Example
//!
//! ```no_run
//! use ariaclient::{Outcome, UpstreamClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UpstreamClient::builder()
//!         .base_url("https://music.example.org")
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     match client.get("/songs/abc123", None).await {
//!         Outcome::Success(payload) => println!("got {payload}"),
//!         other => println!("failed: {}", other.classification()),
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod outcome;

pub use client::{ClientBuilder, Method, UpstreamClient};
pub use error::{Error, Result};
pub use outcome::Outcome;
