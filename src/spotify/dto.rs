//! Spotify Web API Data Transfer Objects
//!
//! These types match EXACTLY what the Spotify Web API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api
//!
//! We use the /search endpoint for track and album queries, /albums/{id}/tracks
//! for album listings, and the /me and playlist endpoints for output.

use serde::{Deserialize, Serialize};

/// One page of items. Spotify wraps every listing in this shape.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Total matches across all pages
    pub total: Option<u32>,
}

/// Response for a `type=track` search
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackSearchResponse {
    pub tracks: Page<TrackObject>,
}

/// Response for a `type=album` search
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumSearchResponse {
    pub albums: Page<AlbumObject>,
}

/// Full track object (search results)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackObject {
    /// Spotify URI (`spotify:track:...`)
    pub uri: String,
    /// Track title
    pub name: String,
    /// Popularity, 0-100. Absent on simplified track objects.
    #[serde(default)]
    pub popularity: u32,
    /// Artists credited on the track, primary first
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
}

/// Simplified artist object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistObject {
    pub id: Option<String>,
    pub name: String,
}

/// Simplified album object (search results)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
}

/// Track entry from the album tracks endpoint.
///
/// These are simplified track objects: no popularity, but they carry their
/// position on the disc.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumTrackObject {
    pub uri: String,
    pub name: String,
    pub track_number: Option<u32>,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
}

/// The current user's profile (`/me`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

/// A created playlist
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistObject {
    pub id: String,
    pub name: Option<String>,
}

/// Response from adding tracks to a playlist
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

/// Error envelope from the Web API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiError,
}

/// Error body: HTTP status plus a human-readable message
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
