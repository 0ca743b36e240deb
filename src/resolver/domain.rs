//! Internal domain models for track resolution.
//!
//! These types are OUR types - they don't change when the catalog API
//! changes. All external API responses get converted into these types via
//! the adapter in the `spotify` module.

/// A track returned by the remote catalog search, a candidate for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCandidate {
    /// Opaque catalog identifier (e.g. `spotify:track:...`)
    pub uri: String,
    /// Track title as the catalog knows it
    pub name: String,
    /// Primary artist name
    pub artist_name: String,
    /// Catalog popularity, 0-100. Tie-break signal only.
    pub popularity: u32,
}

/// A reference to an album in the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRef {
    /// Catalog album ID
    pub id: String,
    /// Album title
    pub name: String,
}

/// Field query for a catalog track search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    /// Track title (usually normalized)
    pub title: String,
    /// Artist name (raw or normalized, depending on the strategy)
    pub artist: String,
    /// Album constraint, when the strategy applies one
    pub album: Option<String>,
}

/// Which cascade strategy produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Title + raw artist + album search, fuzzy-ranked
    Strict,
    /// Title + normalized artist search, no album constraint, fuzzy-ranked
    ArtistRelaxed,
    /// Direct pick by track position within a matched album, never ranked
    AlbumPositional,
}

/// A resolved track: the winning candidate and the strategy that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub candidate: RemoteCandidate,
    pub strategy: StrategyKind,
}

impl Resolution {
    /// Whether this resolution came from the positional album fallback,
    /// meaning the remote title was never checked against the source title.
    pub fn is_positional(&self) -> bool {
        self.strategy == StrategyKind::AlbumPositional
    }
}

/// Outcome of processing one playlist occurrence of a source track.
///
/// Derived per occurrence and only used for the run's log; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The track was resolved and appended to the playlist
    Added(String),
    /// The track resolved to a uri already appended in this run; no append
    Duplicate(String),
    /// Every strategy came up empty
    NotFound,
    /// An external call failed; the run continued without this occurrence
    Failed(String),
}

/// Errors from the remote catalog collaborators (search and playlist calls).
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Resource not found: {0}")]
    NotFound(String),
}
