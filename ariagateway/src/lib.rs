//! Aggregation gateway between a client application and upstream music
//! providers
//!
//! The gateway accepts a small fixed set of logical requests (search,
//! charts, song metadata, stream URLs, playlist/podcast resolution, lyrics,
//! up-next queues, sponsor-skip highlights, trending lists), translates
//! each into one or more upstream HTTP calls, applies fallback and
//! normalization rules, and returns a stable client-friendly JSON contract
//! regardless of upstream failures.
//!
//! # Architecture
//!
//! ```text
//! inbound request
//!     → resolver      (ambiguous id → ordered candidate list)
//!     → orchestrator  (drives ariaclient through the chain, in order)
//!     → normalizer    (upstream payload → declared output shape)
//!     → cache hints   (revalidation window or bypass)
//! → outbound response
//! ```
//!
//! Endpoint-specific behaviour — success predicates, timeout budgets,
//! cache windows — is declarative data in [`endpoint`], keeping the
//! orchestrator generic and testable against synthetic upstream stubs.
//!
//! All state is per-request; the only process-wide values are the two
//! upstream base addresses fixed at startup. No failure in this crate is
//! fatal: every request produces a well-formed JSON response.

pub mod cachehint;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod normalize;
pub mod orchestrator;
pub mod resolver;
pub mod routes;

pub use config::get_config;
pub use error::GatewayError;
pub use routes::{GatewayState, create_router};
