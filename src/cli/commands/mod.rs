//! CLI command definitions and dispatch.
//!
//! This module provides the command-line interface for playlist-porter.
//! Each subcommand is implemented in its own submodule for maintainability:
//! - `convert`: Resolve a library export into a Spotify playlist
//! - `set_credentials`: Store the OAuth client ID and secret
//! - `show_config`: Print where credentials are read from

mod convert;
mod set_credentials;
mod show_config;

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use convert::cmd_convert;
pub use set_credentials::cmd_set_credentials;
pub use show_config::cmd_show_config;

/// Playlist Porter CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Convert a library export into a Spotify playlist
    Convert {
        /// Path to the library XML export. Prompted for when omitted.
        path: Option<PathBuf>,
        /// Playlist name (default: the export's file name)
        #[arg(short, long)]
        name: Option<String>,
        /// Resolve tracks and print outcomes without creating a playlist
        #[arg(long)]
        dry_run: bool,
    },
    /// Store API credentials in the config file
    SetCredentials {
        /// OAuth client ID. Prompted for when omitted.
        #[arg(long)]
        client_id: Option<String>,
        /// OAuth client secret. Prompted for when omitted.
        #[arg(long)]
        client_secret: Option<String>,
    },
    /// Show config file location and credential status
    ShowConfig,
}

/// Run the specified CLI command.
///
/// Running with no subcommand behaves like `convert` with a prompted path,
/// mirroring the original interactive tool.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Some(Commands::Convert {
            path,
            name,
            dry_run,
        }) => cmd_convert(&rt, path.as_deref(), name.as_deref(), *dry_run),
        Some(Commands::SetCredentials {
            client_id,
            client_secret,
        }) => cmd_set_credentials(client_id.as_deref(), client_secret.as_deref()),
        Some(Commands::ShowConfig) => cmd_show_config(),
        None => cmd_convert(&rt, None, None, false),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Read one trimmed line from stdin after printing a prompt
pub(crate) fn prompt(message: &str) -> anyhow::Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Print setup instructions for missing Spotify credentials
pub(crate) fn print_credentials_instructions() {
    eprintln!("Create an app at https://developer.spotify.com/dashboard and either:");
    eprintln!("  - run: playlist-porter set-credentials");
    eprintln!("  - set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET, or");
    if let Some(path) = crate::config::config_path() {
        eprintln!("  - add them under [credentials] in {}", path.display());
    } else {
        eprintln!("  - add them under [credentials] in the config file");
    }
}
