//! Genius API request parameters.
//!
//! Query names (`text_format`, `sort`, `per_page`, `page`, `q`) and their
//! accepted values are part of the upstream wire contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::fetch::RequestDescriptor;
use crate::genius::GeniusError;

/// Representation of rich-text fields (descriptions, annotation bodies).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    #[default]
    Dom,
    Plain,
    Html,
}

impl TextFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextFormat::Dom => "dom",
            TextFormat::Plain => "plain",
            TextFormat::Html => "html",
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextFormat {
    type Err = GeniusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dom" => Ok(TextFormat::Dom),
            "plain" => Ok(TextFormat::Plain),
            "html" => Ok(TextFormat::Html),
            other => Err(GeniusError::InvalidInput(format!("invalid text_format: {other}"))),
        }
    }
}

/// Ordering of an artist's songs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongSort {
    #[default]
    Title,
    Popularity,
}

impl SongSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            SongSort::Title => "title",
            SongSort::Popularity => "popularity",
        }
    }
}

impl FromStr for SongSort {
    type Err = GeniusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SongSort::Title),
            "popularity" => Ok(SongSort::Popularity),
            other => Err(GeniusError::InvalidInput(format!("invalid sort: {other}"))),
        }
    }
}

/// A paged collection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// `GET /artists/{id}/songs` on the official API.
    ArtistSongs { sort: SongSort },
    /// `GET /artists/{id}/albums` on the website's API.
    ArtistAlbums,
    /// `GET /albums/{id}/tracks` on the official API.
    AlbumTracks,
}

impl Collection {
    /// Human-readable label used in error context.
    pub fn label(&self, id: u64) -> String {
        match self {
            Collection::ArtistSongs { .. } => format!("songs of artist {id}"),
            Collection::ArtistAlbums => format!("albums of artist {id}"),
            Collection::AlbumTracks => format!("tracks of album {id}"),
        }
    }

    /// Build the request for one page of this collection.
    pub fn page_request(
        &self, api_base: &str, web_api_base: &str, id: u64, per_page: u32, page: u32,
    ) -> RequestDescriptor {
        let request = match self {
            Collection::ArtistSongs { sort } => {
                RequestDescriptor::get(join_url(api_base, &format!("/artists/{id}/songs"))).query("sort", sort.as_str())
            }
            Collection::ArtistAlbums => RequestDescriptor::get(join_url(web_api_base, &format!("/artists/{id}/albums"))),
            Collection::AlbumTracks => RequestDescriptor::get(join_url(api_base, &format!("/albums/{id}/tracks"))),
        };

        request.query("per_page", per_page).query("page", page)
    }
}

/// Join a base URL and an absolute path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Validate a search query before it is sent.
pub fn validate_query(q: &str) -> Result<(), GeniusError> {
    if q.trim().is_empty() {
        return Err(GeniusError::InvalidInput("query cannot be empty".to_string()));
    }
    Ok(())
}
