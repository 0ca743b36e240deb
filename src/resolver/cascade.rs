//! The resolution cascade: ordered fallback search strategies.
//!
//! For one source track, up to three strategies run in strict order and the
//! first that yields a usable result wins:
//!
//! 1. Strict search: normalized title + exact artist + normalized album.
//! 2. Artist-relaxed search: normalized title + normalized artist, no album.
//! 3. Album-positional fallback: find the album itself, then pick the track
//!    at the source's track number.
//!
//! Strategies 1 and 2 produce candidate lists that are fuzzy-ranked; the
//! positional fallback trusts album ordering outright and returns its pick
//! without ranking, even when the remote title plainly differs from the
//! source title. That is a deliberate precision/recall tradeoff: when no
//! title or artist search succeeds at all, the album's track order is the
//! best signal left.

use crate::model::SourceTrack;

use super::domain::{CatalogError, RemoteCandidate, Resolution, StrategyKind, TrackQuery};
use super::matcher::best_match;
use super::normalize::{normalize_album_title, normalize_artist, normalize_title};
use super::traits::CatalogSearch;

/// Strategy order. First success wins; later entries never run.
const CASCADE: [StrategyKind; 3] = [
    StrategyKind::Strict,
    StrategyKind::ArtistRelaxed,
    StrategyKind::AlbumPositional,
];

/// What one strategy produced.
enum StrategyOutcome {
    /// Nothing usable; fall through to the next strategy
    Miss,
    /// A candidate list that still needs fuzzy ranking
    Ranked(Vec<RemoteCandidate>),
    /// A definitive pick that bypasses ranking
    Direct(RemoteCandidate),
}

/// Resolve one source track against the remote catalog.
///
/// Returns `Ok(None)` when the track is unresolvable (missing name or
/// artist; no search call is made) or when every strategy comes up empty.
/// External call errors propagate to the caller, which treats them as
/// per-track failures.
pub async fn resolve<S: CatalogSearch + ?Sized>(
    track: &SourceTrack,
    search: &S,
) -> Result<Option<Resolution>, CatalogError> {
    if !track.is_resolvable() {
        return Ok(None);
    }

    for strategy in CASCADE {
        match run_strategy(strategy, track, search).await? {
            StrategyOutcome::Miss => continue,
            StrategyOutcome::Direct(candidate) => {
                return Ok(Some(Resolution {
                    candidate,
                    strategy,
                }));
            }
            StrategyOutcome::Ranked(candidates) => {
                let query = format!("{} {}", track.artist, normalize_title(&track.name));
                return Ok(best_match(&candidates, &query).cloned().map(|candidate| {
                    Resolution {
                        candidate,
                        strategy,
                    }
                }));
            }
        }
    }

    Ok(None)
}

async fn run_strategy<S: CatalogSearch + ?Sized>(
    strategy: StrategyKind,
    track: &SourceTrack,
    search: &S,
) -> Result<StrategyOutcome, CatalogError> {
    match strategy {
        StrategyKind::Strict => {
            let query = TrackQuery {
                title: normalize_title(&track.name),
                artist: track.artist.clone(),
                album: Some(normalize_album_title(&track.album)),
            };
            let candidates = search.search_tracks(&query).await?;
            Ok(ranked_or_miss(candidates))
        }
        StrategyKind::ArtistRelaxed => {
            let query = TrackQuery {
                title: normalize_title(&track.name),
                artist: normalize_artist(&track.artist),
                album: None,
            };
            let candidates = search.search_tracks(&query).await?;
            Ok(ranked_or_miss(candidates))
        }
        StrategyKind::AlbumPositional => {
            let albums = search
                .search_albums(&track.artist, &normalize_album_title(&track.album))
                .await?;
            let Some(album) = albums.first() else {
                return Ok(StrategyOutcome::Miss);
            };

            let listing = search.album_tracks(&album.id).await?;
            match track.track_number {
                // 1-indexed position must be within the listing
                Some(position) if position >= 1 && (position as usize) <= listing.len() => {
                    Ok(StrategyOutcome::Direct(
                        listing[position as usize - 1].clone(),
                    ))
                }
                _ => Ok(StrategyOutcome::Miss),
            }
        }
    }
}

fn ranked_or_miss(candidates: Vec<RemoteCandidate>) -> StrategyOutcome {
    if candidates.is_empty() {
        StrategyOutcome::Miss
    } else {
        StrategyOutcome::Ranked(candidates)
    }
}
