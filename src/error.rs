//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors (e.g., [`crate::library::LibraryError`]) for
//!   detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! Fatal conditions (configuration, authentication, unreadable library
//! file) surface through this enum and abort the run; per-track conditions
//! never reach it - they are recorded in the outcome log by the assembler.

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (missing credentials, unwritable config dir)
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Authentication failure
    #[error("Authentication error: {0}")]
    Auth(#[from] crate::spotify::AuthError),

    /// Library export could not be read or decoded
    #[error("Library error: {0}")]
    Library(#[from] crate::library::LibraryError),

    /// A catalog call failed in a context where the run cannot continue
    /// (user profile or playlist creation)
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::resolver::CatalogError),
}
