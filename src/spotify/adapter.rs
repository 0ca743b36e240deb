//! Adapter layer: Convert Spotify DTOs to resolver domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if Spotify changes their response format,
//! only this file and dto.rs need to change.

use crate::resolver::{AlbumRef, RemoteCandidate};

use super::dto;

/// Convert a search track object into a candidate.
///
/// Only the primary (first-credited) artist takes part in matching; the
/// fuzzy query format is `"artist title"` with a single artist name.
pub fn to_candidate(track: dto::TrackObject) -> RemoteCandidate {
    let artist_name = track
        .artists
        .into_iter()
        .next()
        .map(|a| a.name)
        .unwrap_or_default();

    RemoteCandidate {
        uri: track.uri,
        name: track.name,
        artist_name,
        popularity: track.popularity,
    }
}

/// Convert a page of search results into candidates, page order preserved.
pub fn to_candidates(page: dto::Page<dto::TrackObject>) -> Vec<RemoteCandidate> {
    page.items.into_iter().map(to_candidate).collect()
}

/// Convert an album-tracks page into candidates, album order preserved.
///
/// Simplified track objects carry no popularity; it defaults to 0, which is
/// inert because positional picks are never ranked.
pub fn album_page_to_candidates(page: dto::Page<dto::AlbumTrackObject>) -> Vec<RemoteCandidate> {
    page.items
        .into_iter()
        .map(|track| RemoteCandidate {
            uri: track.uri,
            name: track.name,
            artist_name: track
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            popularity: 0,
        })
        .collect()
}

/// Convert album search results into album references, relevance order
/// preserved (the positional fallback takes the first).
pub fn to_album_refs(page: dto::Page<dto::AlbumObject>) -> Vec<AlbumRef> {
    page.items
        .into_iter()
        .map(|album| AlbumRef {
            id: album.id,
            name: album.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(uri: &str, name: &str, artists: Vec<&str>, popularity: u32) -> dto::TrackObject {
        dto::TrackObject {
            uri: uri.to_string(),
            name: name.to_string(),
            popularity,
            artists: artists
                .into_iter()
                .map(|name| dto::ArtistObject {
                    id: None,
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_candidate_takes_primary_artist() {
        let dto = track(
            "spotify:track:x",
            "Under Pressure",
            vec!["Queen", "David Bowie"],
            82,
        );

        let candidate = to_candidate(dto);

        assert_eq!(candidate.artist_name, "Queen");
        assert_eq!(candidate.popularity, 82);
    }

    #[test]
    fn test_candidate_without_artists_gets_empty_name() {
        let dto = track("spotify:track:x", "Orphan", vec![], 0);
        let candidate = to_candidate(dto);
        assert_eq!(candidate.artist_name, "");
    }

    #[test]
    fn test_album_tracks_preserve_order_and_zero_popularity() {
        let page = dto::Page {
            items: vec![
                dto::AlbumTrackObject {
                    uri: "spotify:track:a".to_string(),
                    name: "First".to_string(),
                    track_number: Some(1),
                    artists: vec![],
                },
                dto::AlbumTrackObject {
                    uri: "spotify:track:b".to_string(),
                    name: "Second".to_string(),
                    track_number: Some(2),
                    artists: vec![],
                },
            ],
            total: Some(2),
        };

        let candidates = album_page_to_candidates(page);

        assert_eq!(candidates[0].uri, "spotify:track:a");
        assert_eq!(candidates[1].uri, "spotify:track:b");
        assert!(candidates.iter().all(|c| c.popularity == 0));
    }

    #[test]
    fn test_album_refs_preserve_relevance_order() {
        let page = dto::Page {
            items: vec![
                dto::AlbumObject {
                    id: "best".to_string(),
                    name: "Help!".to_string(),
                    artists: vec![],
                },
                dto::AlbumObject {
                    id: "second".to_string(),
                    name: "Help! (Live)".to_string(),
                    artists: vec![],
                },
            ],
            total: Some(2),
        };

        let refs = to_album_refs(page);

        assert_eq!(refs[0].id, "best");
        assert_eq!(refs[1].id, "second");
    }
}
