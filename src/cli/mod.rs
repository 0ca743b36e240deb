//! Command-line interface for playlist-porter.
//!
//! This module provides the `convert` command that turns a library export
//! into a Spotify playlist, plus the `set-credentials` and `show-config`
//! helpers for credentials setup.

mod commands;

pub use commands::{Cli, Commands, run_command};
