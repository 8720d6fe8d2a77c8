//! Declarative endpoint table
//!
//! Every logical endpoint is described by one [`EndpointSpec`]: which
//! success predicate qualifies an upstream outcome, which timeout budget
//! applies, and how the response may be cached. The orchestrator stays
//! generic; behavioural differences between endpoints are data in this
//! table, not control flow.

use crate::cachehint::{CacheHint, PRIMARY_WINDOW_SECS, SPONSOR_WINDOW_SECS};
use ariaclient::Outcome;
use std::time::Duration;

/// Explicit upper bound for the charts endpoint
///
/// Charts aggregates several heavy upstream computations; past this bound
/// the in-flight call is cancelled rather than stalling the page render.
pub const CHARTS_TIMEOUT: Duration = Duration::from_secs(15);

/// Array-typed fields a charts payload must carry to count as success
pub const CHARTS_REQUIRED_FIELDS: &[&str] = &["songs", "artists"];

/// Array-typed fields an explore payload must carry to count as success
pub const EXPLORE_REQUIRED_FIELDS: &[&str] = &["albums", "playlists"];

/// The gateway's logical endpoint kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    Search,
    Suggestions,
    Charts,
    Explore,
    Home,
    TopPlaylists,
    Song,
    Album,
    Artist,
    Stream,
    Play,
    Podcast,
    Lyrics,
    Queue,
    QueueClear,
    Highlight,
}

/// Endpoint-specific rule deciding when a fallback chain may stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessPredicate {
    /// Any 2xx with a JSON body qualifies
    Default,
    /// 2xx qualifies, and an explicit 404 is a definitive result rather
    /// than a retry trigger (podcast)
    DefinitiveNotFound,
    /// 2xx qualifies only if the payload is an object whose named fields
    /// are all arrays; a well-shaped failure beats propagating garbage
    ShapedObject(&'static [&'static str]),
}

impl SuccessPredicate {
    /// Whether the given outcome terminates the fallback chain
    pub fn accepts(&self, outcome: &Outcome) -> bool {
        match self {
            SuccessPredicate::Default => outcome.is_success(),
            SuccessPredicate::DefinitiveNotFound => {
                outcome.is_success() || matches!(outcome, Outcome::NotFound)
            }
            SuccessPredicate::ShapedObject(fields) => match outcome.payload() {
                Some(payload) => fields
                    .iter()
                    .all(|field| payload.get(field).is_some_and(|v| v.is_array())),
                None => false,
            },
        }
    }
}

/// Per-endpoint resolution rules
#[derive(Debug, Clone, Copy)]
pub struct EndpointSpec {
    pub predicate: SuccessPredicate,
    pub budget: Option<Duration>,
    pub cache_hint: CacheHint,
}

impl EndpointKind {
    /// Look up the declarative rules for this endpoint kind
    pub fn spec(self) -> EndpointSpec {
        let primary = CacheHint::Public {
            max_age: PRIMARY_WINDOW_SECS,
        };

        match self {
            EndpointKind::Charts => EndpointSpec {
                predicate: SuccessPredicate::ShapedObject(CHARTS_REQUIRED_FIELDS),
                budget: Some(CHARTS_TIMEOUT),
                cache_hint: primary,
            },
            EndpointKind::Explore => EndpointSpec {
                predicate: SuccessPredicate::ShapedObject(EXPLORE_REQUIRED_FIELDS),
                budget: None,
                cache_hint: primary,
            },
            EndpointKind::Podcast => EndpointSpec {
                predicate: SuccessPredicate::DefinitiveNotFound,
                budget: None,
                cache_hint: primary,
            },
            EndpointKind::Stream | EndpointKind::Queue | EndpointKind::QueueClear => EndpointSpec {
                predicate: SuccessPredicate::Default,
                budget: None,
                cache_hint: CacheHint::Bypass,
            },
            EndpointKind::Highlight => EndpointSpec {
                predicate: SuccessPredicate::Default,
                budget: None,
                cache_hint: CacheHint::Public {
                    max_age: SPONSOR_WINDOW_SECS,
                },
            },
            EndpointKind::Search
            | EndpointKind::Suggestions
            | EndpointKind::Home
            | EndpointKind::TopPlaylists
            | EndpointKind::Song
            | EndpointKind::Album
            | EndpointKind::Artist
            | EndpointKind::Play
            | EndpointKind::Lyrics => EndpointSpec {
                predicate: SuccessPredicate::Default,
                budget: None,
                cache_hint: primary,
            },
        }
    }
}
