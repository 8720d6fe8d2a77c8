//! Identifier resolution
//!
//! A user-supplied identifier can be ambiguous: a "play" id may denote a
//! playlist, a radio mix, or a plain song. The resolver turns one raw id
//! into the ordered list of upstream interpretations to try. The ordering
//! is policy data, not branching — future upstream changes should only
//! require editing [`PLAY_POLICY`].

/// Marker prefix some upstreams put in front of playlist identifiers
pub const PLAYLIST_MARKER: &str = "VL";

/// How a candidate identifier should be interpreted upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    Playlist,
    Song,
    Podcast,
    /// The path was supplied verbatim; no identifier rewriting involved
    Verbatim,
}

/// Identifier rewrite applied before interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdTransform {
    /// Strip a leading playlist marker (case-insensitive), if present
    StripPlaylistMarker,
    /// Use the identifier exactly as supplied
    Verbatim,
}

impl IdTransform {
    fn apply<'a>(&self, raw_id: &'a str) -> &'a str {
        match self {
            IdTransform::StripPlaylistMarker => {
                let marker = PLAYLIST_MARKER.as_bytes();
                // Byte comparison: a matching prefix is ASCII, so the slice
                // below always lands on a char boundary.
                if raw_id.as_bytes().len() >= marker.len()
                    && raw_id.as_bytes()[..marker.len()].eq_ignore_ascii_case(marker)
                {
                    &raw_id[marker.len()..]
                } else {
                    raw_id
                }
            }
            IdTransform::Verbatim => raw_id,
        }
    }
}

/// Resolution order for ambiguous "play" identifiers
///
/// Playlist-shaped lookups are more informative than the single-song
/// fallback, and the verbatim playlist retry covers upstreams that expect
/// the marker left intact.
pub const PLAY_POLICY: &[(IdTransform, Interpretation)] = &[
    (IdTransform::StripPlaylistMarker, Interpretation::Playlist),
    (IdTransform::Verbatim, Interpretation::Playlist),
    (IdTransform::Verbatim, Interpretation::Song),
];

/// One upstream call attempt produced by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: String,
    pub interpretation: Interpretation,
}

impl Candidate {
    fn new(id: &str, interpretation: Interpretation) -> Self {
        let path = match interpretation {
            Interpretation::Playlist => format!("/playlists/{}", id),
            Interpretation::Song => format!("/songs/{}", id),
            Interpretation::Podcast => format!("/podcasts/{}", id),
            Interpretation::Verbatim => id.to_string(),
        };
        Self {
            path,
            interpretation,
        }
    }

    /// Single-candidate chain for endpoints with no identifier ambiguity
    pub fn verbatim(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            interpretation: Interpretation::Verbatim,
        }
    }
}

/// Build the fallback chain for the "play" endpoint
///
/// A marked identifier yields three candidates, an unmarked one two (the
/// no-op strip collapses into the verbatim playlist attempt):
///
/// ```
/// use ariagateway::resolver::play_candidates;
///
/// assert_eq!(play_candidates("VLabc123").len(), 3);
/// assert_eq!(play_candidates("abc123").len(), 2);
/// ```
pub fn play_candidates(raw_id: &str) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::with_capacity(PLAY_POLICY.len());

    for (transform, interpretation) in PLAY_POLICY {
        let candidate = Candidate::new(transform.apply(raw_id), *interpretation);
        // A no-op transform duplicates its neighbour; paying a second
        // network call for the same path would be pointless.
        if candidates.last() != Some(&candidate) {
            candidates.push(candidate);
        }
    }

    candidates
}

/// Build the single-candidate chain for the podcast endpoint
///
/// The upstream normalizes all three accepted id forms itself, so the
/// resolver issues exactly one call; a 404 is definitive, never retried
/// with a different form.
pub fn podcast_candidates(raw_id: &str) -> Vec<Candidate> {
    vec![Candidate::new(raw_id, Interpretation::Podcast)]
}
