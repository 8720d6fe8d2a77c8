//! Cache-hint policy
//!
//! Read-mostly endpoints advertise a revalidation window to intermediate
//! caches; session-specific and mutating endpoints bypass caching entirely.
//! The hint is pure data here — the route layer renders it as a
//! `Cache-Control` header on successful responses.

/// Freshness window for endpoints backed by the primary upstream (10 min)
pub const PRIMARY_WINDOW_SECS: u32 = 600;

/// Freshness window for the skip-segment upstream (1 hour)
pub const SPONSOR_WINDOW_SECS: u32 = 3600;

/// Caching instruction attached to an outgoing response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHint {
    /// Response may be cached and served stale while revalidating
    Public { max_age: u32 },
    /// Response must not be cached (queue, stream)
    Bypass,
}

impl CacheHint {
    /// Render the hint as a `Cache-Control` header value
    pub fn header_value(&self) -> String {
        match self {
            CacheHint::Public { max_age } => {
                format!("public, s-maxage={}, stale-while-revalidate=59", max_age)
            }
            CacheHint::Bypass => "no-store".to_string(),
        }
    }
}
