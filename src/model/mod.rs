//! Core data models for the imported library.
//!
//! Defines [`SourceTrack`], one track entry from the library export, and
//! [`Library`], the parsed export: a playlist order plus a track lookup map.
//! These are produced by the `library` module and consumed read-only by the
//! resolver.

use std::collections::HashMap;

/// A track entry from the imported library export.
///
/// Immutable once parsed. Missing string fields are represented as empty
/// strings; a track without a name or artist cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTrack {
    /// Track ID, unique within the library
    pub id: u64,
    /// Track title
    pub name: String,
    /// Artist name
    pub artist: String,
    /// Album title
    pub album: String,
    /// 1-based position of the track within its album
    pub track_number: Option<u32>,
}

impl SourceTrack {
    /// Whether this track carries enough information to attempt resolution.
    ///
    /// A missing name or artist makes the record unresolvable; it is skipped
    /// without emitting an outcome.
    pub fn is_resolvable(&self) -> bool {
        !self.name.is_empty() && !self.artist.is_empty()
    }
}

/// A parsed library export: playlist order plus track metadata.
#[derive(Debug, Clone, Default)]
pub struct Library {
    /// Playlist name (derived from the export's file stem)
    pub name: String,
    /// Ordered track IDs defining resolution and insertion order.
    /// The same ID may appear more than once.
    pub order: Vec<u64>,
    /// Track metadata keyed by track ID
    pub tracks: HashMap<u64, SourceTrack>,
}
