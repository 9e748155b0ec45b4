//! song_lyrics tool implementation.
//!
//! Resolves a song by Genius id (metadata plus lyrics) or scrapes a song page
//! URL directly. The URL form needs no access token.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use versefetch_client::{FetchClient, FetchConfig, LyricsExtractor, fetch_lyrics};
use versefetch_core::{AppConfig, Error};

use super::{genius_client, json_result, tool_error};

/// Input parameters for song_lyrics tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SongLyricsParams {
    /// Genius song id.
    #[serde(default)]
    pub song_id: Option<u64>,

    /// Song page URL, e.g. https://genius.com/Kendrick-lamar-alright-lyrics.
    #[serde(default)]
    pub url: Option<String>,
}

/// Output structure for song_lyrics tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SongLyricsOutput {
    /// Genius song id (absent when looked up by URL).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Song page the lyrics were taken from.
    pub url: String,
    pub lyrics: String,
}

/// Implementation of the song_lyrics tool.
pub async fn song_lyrics_impl(
    config: &AppConfig, shutdown: &CancellationToken, params: SongLyricsParams,
) -> Result<CallToolResult, McpError> {
    let output = match (params.song_id, params.url) {
        (Some(_), Some(_)) => {
            return Err(Error::InvalidInput("pass either song_id or url, not both".into()).into());
        }
        (None, None) => {
            return Err(Error::InvalidInput("song_id or url is required".into()).into());
        }
        (Some(song_id), None) => {
            let client = genius_client(config, shutdown)?;
            let song = client.song_with_lyrics(song_id).await.map_err(tool_error)?;

            SongLyricsOutput {
                song_id: Some(song.id),
                title: Some(song.title),
                artist: song.primary_artist.map(|artist| artist.name),
                url: song.url,
                lyrics: song.lyrics.unwrap_or_default(),
            }
        }
        (None, Some(url)) => {
            let fetch = FetchClient::new(FetchConfig::from(config)).map_err(tool_error)?;
            let lyrics = fetch_lyrics(&fetch, &LyricsExtractor::new(), &url, shutdown)
                .await
                .map_err(tool_error)?;

            SongLyricsOutput { song_id: None, title: None, artist: None, url, lyrics }
        }
    };

    tracing::debug!(url = %output.url, chars = output.lyrics.len(), "song_lyrics completed");

    json_result(&output)
}
