//! artist_songs tool implementation.
//!
//! Lists an artist's songs through the paginator: exactly `limit` songs when a
//! limit is given, otherwise every song the API reports.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use versefetch_client::{PageTarget, SongSort};
use versefetch_core::AppConfig;

use super::{genius_client, json_result, tool_error};

/// Input parameters for artist_songs tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ArtistSongsParams {
    /// Genius artist id.
    pub artist_id: u64,

    /// Sort order: "title" (default) or "popularity".
    #[serde(default)]
    pub sort: Option<String>,

    /// Number of songs to return. Omit to fetch all of them.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Output structure for artist_songs tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArtistSongsOutput {
    pub artist_id: u64,
    pub sort: String,
    /// Number of songs returned.
    pub count: usize,
    pub songs: Vec<SongSummary>,
}

/// Condensed song entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SongSummary {
    pub id: u64,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

/// Implementation of the artist_songs tool.
pub async fn artist_songs_impl(
    config: &AppConfig, shutdown: &CancellationToken, params: ArtistSongsParams,
) -> Result<CallToolResult, McpError> {
    let sort = match params.sort.as_deref() {
        Some(sort) => sort.parse::<SongSort>().map_err(tool_error)?,
        None => SongSort::default(),
    };

    let client = genius_client(config, shutdown)?;
    let songs = client
        .artist_songs(params.artist_id, sort, PageTarget::from_limit(params.limit))
        .await
        .map_err(tool_error)?;

    let output = ArtistSongsOutput {
        artist_id: params.artist_id,
        sort: sort.as_str().to_string(),
        count: songs.len(),
        songs: songs
            .into_iter()
            .map(|song| SongSummary {
                id: song.id,
                title: song.title,
                url: song.url,
                artist: song.primary_artist.map(|artist| artist.name),
            })
            .collect(),
    };

    json_result(&output)
}
