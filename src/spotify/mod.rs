//! Spotify Web API collaborators: authentication and catalog access.
//!
//! The resolver never sees these types directly; it talks to the client
//! through the `CatalogSearch`/`PlaylistSink` traits, and the client
//! converts raw API responses to domain types via the adapter. If Spotify
//! changes a response shape, only `dto.rs` and `adapter.rs` change.

pub mod adapter;
pub mod auth;
pub mod client;
pub mod dto;

pub use auth::{AuthError, SpotifyAuth, StoredToken};
pub use client::SpotifyClient;
