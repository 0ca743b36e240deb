//! Spotify Web API HTTP client
//!
//! Handles communication with api.spotify.com on behalf of the resolver and
//! the playlist output. All calls carry a Bearer token obtained by the auth
//! module and a 30 second timeout, so a hung call surfaces as a per-track
//! failure instead of wedging the whole run.

use reqwest::StatusCode;

use crate::resolver::{AlbumRef, CatalogError, RemoteCandidate, TrackQuery};

use super::{adapter, dto};

/// Spotify Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    access_token: String,
}

/// Search result page size. Matches the catalog's default and keeps the
/// ranking pool small enough that textual noise doesn't drown the matcher.
const SEARCH_LIMIT: u32 = 10;

/// Album listings are fetched in one page; albums longer than this fall
/// back to NotFound for out-of-range positions.
const ALBUM_TRACKS_LIMIT: u32 = 50;

const CALL_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

impl SpotifyClient {
    /// Create a new client around an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true) // Accept gzip-compressed responses
            .timeout(CALL_TIMEOUT)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://api.spotify.com/v1".to_string(),
            access_token: access_token.into(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Search the catalog for tracks matching the field query
    pub async fn search_tracks(
        &self,
        query: &TrackQuery,
    ) -> Result<Vec<RemoteCandidate>, CatalogError> {
        let q = build_track_query(query);
        let url = format!("{}/search", self.base_url);
        let limit = SEARCH_LIMIT.to_string();

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", q.as_str()),
                ("type", "track"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let response: dto::TrackSearchResponse = parse_response(response).await?;
        Ok(adapter::to_candidates(response.tracks))
    }

    /// Search the catalog for albums, most relevant first
    pub async fn search_albums(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<Vec<AlbumRef>, CatalogError> {
        let q = format!("artist:{artist} album:{album}");
        let url = format!("{}/search", self.base_url);
        let limit = SEARCH_LIMIT.to_string();

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", q.as_str()),
                ("type", "album"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let response: dto::AlbumSearchResponse = parse_response(response).await?;
        Ok(adapter::to_album_refs(response.albums))
    }

    /// List an album's tracks in album order
    pub async fn album_tracks(&self, album_id: &str) -> Result<Vec<RemoteCandidate>, CatalogError> {
        let url = format!(
            "{}/albums/{}/tracks",
            self.base_url,
            urlencoding::encode(album_id)
        );

        let limit = ALBUM_TRACKS_LIMIT.to_string();
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let page: dto::Page<dto::AlbumTrackObject> = parse_response(response).await?;
        Ok(adapter::album_page_to_candidates(page))
    }

    /// Fetch the authenticated user's profile
    pub async fn current_user(&self) -> Result<dto::UserProfile, CatalogError> {
        let url = format!("{}/me", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        parse_response(response).await
    }

    /// Create a playlist owned by `owner_id` and return its ID
    pub async fn create_playlist(&self, owner_id: &str, name: &str) -> Result<String, CatalogError> {
        let url = format!(
            "{}/users/{}/playlists",
            self.base_url,
            urlencoding::encode(owner_id)
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let playlist: dto::PlaylistObject = parse_response(response).await?;
        Ok(playlist.id)
    }

    /// Append one track uri to a playlist
    pub async fn add_track(&self, playlist_id: &str, uri: &str) -> Result<(), CatalogError> {
        let url = format!(
            "{}/playlists/{}/tracks",
            self.base_url,
            urlencoding::encode(playlist_id)
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "uris": [uri] }))
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let _snapshot: dto::SnapshotResponse = parse_response(response).await?;
        Ok(())
    }
}

/// Build the field query string for a track search.
///
/// Field syntax (`track:... artist:... album:...`) scopes each term the way
/// the original tool's queries did.
fn build_track_query(query: &TrackQuery) -> String {
    let mut q = format!("track:{} artist:{}", query.title, query.artist);
    if let Some(ref album) = query.album {
        if !album.is_empty() {
            q.push_str(&format!(" album:{album}"));
        }
    }
    q
}

/// Map an HTTP response to a parsed body or a catalog error
async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, CatalogError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound(status.to_string()));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(CatalogError::RateLimited);
    }

    if !status.is_success() {
        // Try to parse the error envelope for a readable message
        if let Ok(envelope) = response.json::<dto::ApiErrorEnvelope>().await {
            return Err(CatalogError::Api(format!(
                "HTTP {}: {}",
                envelope.error.status, envelope.error.message
            )));
        }
        return Err(CatalogError::Api(format!(
            "HTTP {}: {}",
            status,
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| CatalogError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SpotifyClient::new("token");
        assert_eq!(client.base_url, "https://api.spotify.com/v1");
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = SpotifyClient::with_base_url("token", "http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_track_query_with_album() {
        let q = build_track_query(&TrackQuery {
            title: "Yesterday".to_string(),
            artist: "The Beatles".to_string(),
            album: Some("Help!".to_string()),
        });
        assert_eq!(q, "track:Yesterday artist:The Beatles album:Help!");
    }

    #[test]
    fn test_track_query_without_album() {
        let q = build_track_query(&TrackQuery {
            title: "Yesterday".to_string(),
            artist: "Beatles".to_string(),
            album: None,
        });
        assert_eq!(q, "track:Yesterday artist:Beatles");
    }

    #[test]
    fn test_track_query_skips_empty_album() {
        let q = build_track_query(&TrackQuery {
            title: "Single".to_string(),
            artist: "Somebody".to_string(),
            album: Some(String::new()),
        });
        assert_eq!(q, "track:Single artist:Somebody");
    }
}
