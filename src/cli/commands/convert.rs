//! The convert command: library export in, Spotify playlist out.

use std::path::{Path, PathBuf};

use tokio::runtime::Runtime;

use crate::library::{self, LibraryError};
use crate::model::Library;
use crate::resolver::{self, PlaylistSink, ResolutionOutcome, StrategyKind, TrackReport};
use crate::spotify::{SpotifyAuth, SpotifyClient};
use crate::{config, error};

use super::{print_credentials_instructions, prompt};

/// Convert a library export into a Spotify playlist.
///
/// Fatal conditions (missing credentials, failed authentication, unreadable
/// export) print a user-facing message and exit non-zero before any track
/// is processed. Per-track conditions only show up in the outcome lines.
pub fn cmd_convert(
    rt: &Runtime,
    path: Option<&Path>,
    name: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(prompt("Name of the library XML export file: ")?),
    };

    // Parse before touching the network; a bad file should fail fast
    let library = match library::parse_library(&path) {
        Ok(library) => library,
        Err(LibraryError::NotFound(path)) => {
            eprintln!("The specified library file was not found: {path}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error reading the library file: {e}");
            eprintln!("Please ensure the file is a valid library XML export.");
            std::process::exit(1);
        }
    };

    if library.order.is_empty() {
        println!("The export contains no playlist entries; nothing to convert.");
        return Ok(());
    }

    let config = config::load();
    let credentials = match config.credentials.resolve() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("Error: {e}");
            print_credentials_instructions();
            std::process::exit(1);
        }
    };

    let playlist_name = name.unwrap_or(&library.name).to_string();

    rt.block_on(async move {
        if dry_run {
            run_dry(&library, credentials).await
        } else {
            run_convert(&library, credentials, &playlist_name).await
        }
    })?;

    Ok(())
}

/// The real conversion: authenticate, create the playlist, assemble.
async fn run_convert(
    library: &Library,
    credentials: config::ResolvedCredentials,
    playlist_name: &str,
) -> error::Result<()> {
    let auth = SpotifyAuth::new(credentials);
    let token = auth.access_token().await?;
    let client = SpotifyClient::new(token.access_token);

    let user = client.current_user().await?;
    tracing::info!(user = %user.id, "authenticated");

    let playlist_id = client.create_playlist(&user.id, playlist_name).await?;
    println!("Created playlist \"{playlist_name}\"");
    println!();

    let reports = resolver::assemble(
        &library.order,
        &library.tracks,
        &client,
        &client,
        &playlist_id,
    )
    .await;

    print_reports(&reports);
    Ok(())
}

/// Dry run: resolve everything, append nowhere.
async fn run_dry(library: &Library, credentials: config::ResolvedCredentials) -> error::Result<()> {
    let auth = SpotifyAuth::new(credentials);
    let token = auth.access_token().await?;
    let client = SpotifyClient::new(token.access_token);

    println!("Dry run: resolving {} entries without creating a playlist", library.order.len());
    println!();

    let sink = DiscardSink;
    let reports = resolver::assemble(&library.order, &library.tracks, &client, &sink, "dry-run").await;

    print_reports(&reports);
    Ok(())
}

/// Sink that accepts every append without calling the API.
struct DiscardSink;

#[async_trait::async_trait]
impl PlaylistSink for DiscardSink {
    async fn create_playlist(
        &self,
        _owner_id: &str,
        _name: &str,
    ) -> Result<String, resolver::CatalogError> {
        Ok("dry-run".to_string())
    }

    async fn append(&self, _playlist_id: &str, _uri: &str) -> Result<(), resolver::CatalogError> {
        Ok(())
    }
}

/// Print one line per outcome plus a summary, in playlist order.
fn print_reports(reports: &[TrackReport]) {
    let mut added = 0usize;
    let mut duplicates = 0usize;
    let mut missing = 0usize;
    let mut failed = 0usize;

    for report in reports {
        match &report.outcome {
            ResolutionOutcome::Added(_) => {
                added += 1;
                if report.strategy == Some(StrategyKind::AlbumPositional) {
                    println!(
                        "Added {} - {} to playlist, but it may have a different name.",
                        report.artist, report.name
                    );
                } else {
                    println!("Added {} - {} to playlist.", report.artist, report.name);
                }
            }
            ResolutionOutcome::Duplicate(_) => {
                duplicates += 1;
                println!("Skipped duplicate track: {} - {}", report.artist, report.name);
            }
            ResolutionOutcome::NotFound => {
                missing += 1;
                println!("*** {} - {} could not be found. ***", report.artist, report.name);
            }
            ResolutionOutcome::Failed(message) => {
                failed += 1;
                eprintln!("!!! {} - {} failed: {message}", report.artist, report.name);
            }
        }
    }

    println!();
    println!(
        "Done: {added} added, {duplicates} duplicates skipped, {missing} not found, {failed} failed."
    );
}
