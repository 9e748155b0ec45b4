//! Client code for versefetch.
//!
//! This crate provides the rate-limit-aware request executor, the lyric page
//! extractor, and the typed Genius API client used by the server.

pub mod extract;
pub mod fetch;
pub mod genius;

pub use extract::{LocateStrategy, LyricsExtractor, extract_lyrics};
pub use fetch::{FetchClient, FetchConfig, RequestDescriptor};
pub use genius::{GeniusClient, GeniusConfig, GeniusError, HitKind, PageTarget, SongSort, TextFormat, fetch_lyrics};
