//! Genius API response types.
//!
//! Every endpoint answers with `{"meta": {...}, "response": {...}}`; the shape
//! of `response` depends on the endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::genius::GeniusError;
use crate::genius::request::TextFormat;

/// Top-level JSON envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub meta: Option<Meta>,
    pub response: Option<T>,
}

/// Status block accompanying every envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_path: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub header_image_url: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    /// Rich text in the requested `text_format`.
    #[serde(default)]
    pub description: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub full_title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub lyrics_state: Option<String>,
    #[serde(default)]
    pub release_date_for_display: Option<String>,
    #[serde(default)]
    pub header_image_url: Option<String>,
    #[serde(default)]
    pub song_art_image_url: Option<String>,
    #[serde(default)]
    pub annotation_count: u32,
    #[serde(default)]
    pub pyongs_count: Option<u32>,
    #[serde(default)]
    pub primary_artist: Option<Artist>,
    #[serde(default)]
    pub album: Option<Album>,
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    /// Filled in from the song page; never sent by the API.
    #[serde(default)]
    pub lyrics: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub cover_art_url: Option<String>,
    #[serde(default)]
    pub release_date_for_display: Option<String>,
    #[serde(default)]
    pub artist: Option<Artist>,
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    /// Filled in by the tracks paginator when requested.
    #[serde(default)]
    pub tracks: Vec<AlbumTrack>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumTrack {
    #[serde(default)]
    pub number: Option<u32>,
    pub song: Song,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub votes_total: i64,
    /// Keyed by text format, e.g. `{"plain": "..."}`.
    #[serde(default)]
    pub body: serde_json::Value,
}

impl Annotation {
    /// Annotation body in the given format.
    ///
    /// Plain and HTML bodies are strings; a DOM body is returned as JSON.
    pub fn body_text(&self, format: TextFormat) -> Option<String> {
        let value = self.body.get(format.as_str())?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub iq: Option<i64>,
    #[serde(default)]
    pub avatar: Option<serde_json::Value>,
}

/// Payload of `/songs/{id}`.
#[derive(Debug, Deserialize)]
pub struct SongPayload {
    pub song: Option<Song>,
}

/// Payload of `/artists/{id}`.
#[derive(Debug, Deserialize)]
pub struct ArtistPayload {
    pub artist: Option<Artist>,
}

/// Payload of `/albums/{id}`.
#[derive(Debug, Deserialize)]
pub struct AlbumPayload {
    pub album: Option<Album>,
}

/// Payload of `/annotations/{id}`.
#[derive(Debug, Deserialize)]
pub struct AnnotationPayload {
    pub annotation: Option<Annotation>,
}

/// Payload of `/account/`.
#[derive(Debug, Deserialize)]
pub struct AccountPayload {
    pub user: Option<Account>,
}

/// One page of a paged collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Server cursor; `None` or `0` means exhausted.
    pub next_page: Option<u32>,
}

/// A collection payload that can be flattened into a [`Page`].
pub trait PagePayload: DeserializeOwned + Send {
    type Item: Send;

    fn into_page(self) -> Page<Self::Item>;
}

#[derive(Debug, Deserialize)]
pub struct SongsPage {
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default)]
    pub next_page: Option<u32>,
}

impl PagePayload for SongsPage {
    type Item = Song;

    fn into_page(self) -> Page<Song> {
        Page { items: self.songs, next_page: self.next_page }
    }
}

#[derive(Debug, Deserialize)]
pub struct AlbumsPage {
    #[serde(default)]
    pub albums: Vec<Album>,
    #[serde(default)]
    pub next_page: Option<u32>,
}

impl PagePayload for AlbumsPage {
    type Item = Album;

    fn into_page(self) -> Page<Album> {
        Page { items: self.albums, next_page: self.next_page }
    }
}

#[derive(Debug, Deserialize)]
pub struct TracksPage {
    #[serde(default)]
    pub tracks: Vec<AlbumTrack>,
    #[serde(default)]
    pub next_page: Option<u32>,
}

impl PagePayload for TracksPage {
    type Item = AlbumTrack;

    fn into_page(self) -> Page<AlbumTrack> {
        Page { items: self.tracks, next_page: self.next_page }
    }
}

/// Kind of a search hit or section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    Song,
    Artist,
    Album,
}

impl HitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitKind::Song => "song",
            HitKind::Artist => "artist",
            HitKind::Album => "album",
        }
    }
}

/// Result object of a search hit. Songs carry `title`, artists and albums
/// carry `name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_title: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub primary_artist: Option<Artist>,
}

impl HitResult {
    /// Title for songs, name for everything else.
    pub fn display_name(&self, kind: HitKind) -> Option<&str> {
        match kind {
            HitKind::Song => self.title.as_deref(),
            HitKind::Artist | HitKind::Album => self.name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub index: String,
    pub result: HitResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSection {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Payload of `/search`.
#[derive(Debug, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Payload of `/search/multi`: hits grouped into typed sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSections {
    #[serde(default)]
    pub sections: Vec<SearchSection>,
}

impl SearchSections {
    /// All hits from sections of the given kind, in ranked order.
    pub fn hits_of(&self, kind: HitKind) -> Vec<&SearchHit> {
        self.sections
            .iter()
            .filter(|section| section.kind == kind.as_str())
            .flat_map(|section| section.hits.iter())
            .collect()
    }

    /// Hit whose display name equals `term` (ignoring case), else the top hit.
    pub fn best_match(&self, kind: HitKind, term: &str) -> Result<&HitResult, GeniusError> {
        let hits = self.hits_of(kind);

        hits.iter()
            .copied()
            .find(|hit| {
                hit.result
                    .display_name(kind)
                    .is_some_and(|name| name.to_lowercase() == term.to_lowercase())
            })
            .or_else(|| hits.first().copied())
            .map(|hit| &hit.result)
            .ok_or_else(|| GeniusError::NotFound { resource: format!("{} matching {term:?}", kind.as_str()) })
    }
}
