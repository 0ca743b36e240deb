//! Trait definitions for the external catalog collaborators.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real Spotify client implementation, while tests
//! substitute recording mocks.

use async_trait::async_trait;

use super::domain::{AlbumRef, CatalogError, RemoteCandidate, TrackQuery};

/// Trait for catalog search: tracks, albums, and album track listings.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search the catalog for tracks matching the given field query.
    async fn search_tracks(&self, query: &TrackQuery) -> Result<Vec<RemoteCandidate>, CatalogError>;

    /// Search the catalog for albums by artist and album title,
    /// most relevant first.
    async fn search_albums(&self, artist: &str, album: &str)
    -> Result<Vec<AlbumRef>, CatalogError>;

    /// List an album's tracks in album order.
    async fn album_tracks(&self, album_id: &str) -> Result<Vec<RemoteCandidate>, CatalogError>;
}

/// Trait for the destination playlist.
#[async_trait]
pub trait PlaylistSink: Send + Sync {
    /// Create a playlist owned by `owner_id` and return its ID.
    async fn create_playlist(&self, owner_id: &str, name: &str) -> Result<String, CatalogError>;

    /// Append one track uri to the playlist.
    async fn append(&self, playlist_id: &str, uri: &str) -> Result<(), CatalogError>;
}

// Implement traits for the real client

#[async_trait]
impl CatalogSearch for crate::spotify::SpotifyClient {
    async fn search_tracks(&self, query: &TrackQuery) -> Result<Vec<RemoteCandidate>, CatalogError> {
        self.search_tracks(query).await
    }

    async fn search_albums(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<Vec<AlbumRef>, CatalogError> {
        self.search_albums(artist, album).await
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<RemoteCandidate>, CatalogError> {
        self.album_tracks(album_id).await
    }
}

#[async_trait]
impl PlaylistSink for crate::spotify::SpotifyClient {
    async fn create_playlist(&self, owner_id: &str, name: &str) -> Result<String, CatalogError> {
        self.create_playlist(owner_id, name).await
    }

    async fn append(&self, playlist_id: &str, uri: &str) -> Result<(), CatalogError> {
        self.add_track(playlist_id, uri).await
    }
}
