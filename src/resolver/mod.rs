//! Track resolution engine - maps library tracks to remote catalog entries.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **Normalizer** (`normalize.rs`) - Query cleanup for titles, albums, artists
//! - **Matcher** (`matcher.rs`) - Fuzzy ranking of multi-candidate results
//! - **Cascade** (`cascade.rs`) - Ordered fallback search strategies
//! - **Assembler** (`assembler.rs`) - Source-order iteration, dedup, outcome log
//! - **Traits** (`traits.rs`) - Seams for the catalog search and playlist sink
//!
//! The engine never talks HTTP itself: it sees the catalog only through the
//! [`CatalogSearch`] and [`PlaylistSink`] traits, so tests drive it with
//! recording mocks and the production binary plugs in the Spotify client.

pub mod assembler;
pub mod cascade;
pub mod domain;
pub mod matcher;
pub mod normalize;
pub mod traits;

pub use assembler::{TrackReport, assemble};
pub use cascade::resolve;
pub use domain::{
    AlbumRef, CatalogError, RemoteCandidate, Resolution, ResolutionOutcome, StrategyKind,
    TrackQuery,
};
pub use traits::{CatalogSearch, PlaylistSink};
