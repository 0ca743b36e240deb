//! Playlist Porter - migrate a music library export to a Spotify playlist.
//!
//! Reads an iTunes-style XML library export, resolves each track against the
//! Spotify catalog through a cascade of search strategies, and appends the
//! matches to a freshly created playlist in source order.

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod model;
pub mod resolver;
pub mod spotify;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::from_default_env().add_directive("playlist_porter=info".parse().unwrap()),
        )
        .init();

    cli::run_command(&args)
}
