//! Playlist assembly: source-order iteration, dedup, and outcome reporting.
//!
//! Walks the playlist order, resolves each occurrence through the cascade,
//! and appends hits to the destination playlist. A run-scoped set of
//! already-appended uris guarantees each uri is appended at most once per
//! run; the set is owned here, never global, so repeated runs start clean.

use std::collections::{HashMap, HashSet};

use crate::model::SourceTrack;

use super::cascade;
use super::domain::{ResolutionOutcome, StrategyKind};
use super::traits::{CatalogSearch, PlaylistSink};

/// Per-occurrence report, in playlist order. Feeds the CLI's output lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackReport {
    pub track_id: u64,
    pub artist: String,
    pub name: String,
    pub outcome: ResolutionOutcome,
    /// Which strategy resolved the track, when one did
    pub strategy: Option<StrategyKind>,
}

/// Resolve every occurrence in `order` and append hits to the playlist.
///
/// Occurrences are processed strictly in order, duplicates independently.
/// IDs that are absent from `tracks`, or tracks missing a name or artist,
/// are skipped silently with no report. External call failures are recorded
/// per occurrence and never abort the run; the original tool had no such
/// guard, so an HTTP hiccup killed the whole conversion.
pub async fn assemble<S, P>(
    order: &[u64],
    tracks: &HashMap<u64, SourceTrack>,
    search: &S,
    sink: &P,
    playlist_id: &str,
) -> Vec<TrackReport>
where
    S: CatalogSearch + ?Sized,
    P: PlaylistSink + ?Sized,
{
    let mut added: HashSet<String> = HashSet::new();
    let mut reports = Vec::new();

    for &track_id in order {
        let Some(track) = tracks.get(&track_id) else {
            tracing::debug!(track_id, "skipping unknown track id");
            continue;
        };
        if !track.is_resolvable() {
            tracing::debug!(track_id, "skipping track with missing name or artist");
            continue;
        }

        let resolution = match cascade::resolve(track, search).await {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::warn!(
                    track_id,
                    artist = %track.artist,
                    name = %track.name,
                    error = %e,
                    "resolution failed, continuing"
                );
                reports.push(report(track, ResolutionOutcome::Failed(e.to_string()), None));
                continue;
            }
        };

        let Some(resolution) = resolution else {
            reports.push(report(track, ResolutionOutcome::NotFound, None));
            continue;
        };

        let uri = resolution.candidate.uri.clone();
        if added.contains(&uri) {
            reports.push(report(
                track,
                ResolutionOutcome::Duplicate(uri),
                Some(resolution.strategy),
            ));
            continue;
        }

        match sink.append(playlist_id, &uri).await {
            Ok(()) => {
                added.insert(uri.clone());
                reports.push(report(
                    track,
                    ResolutionOutcome::Added(uri),
                    Some(resolution.strategy),
                ));
            }
            Err(e) => {
                tracing::warn!(
                    track_id,
                    artist = %track.artist,
                    name = %track.name,
                    error = %e,
                    "playlist append failed, continuing"
                );
                reports.push(report(
                    track,
                    ResolutionOutcome::Failed(e.to_string()),
                    Some(resolution.strategy),
                ));
            }
        }
    }

    reports
}

fn report(
    track: &SourceTrack,
    outcome: ResolutionOutcome,
    strategy: Option<StrategyKind>,
) -> TrackReport {
    TrackReport {
        track_id: track.id,
        artist: track.artist.clone(),
        name: track.name.clone(),
        outcome,
        strategy,
    }
}
