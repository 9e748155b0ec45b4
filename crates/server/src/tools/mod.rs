//! MCP tool implementations.
//!
//! This module contains all tools exposed by the versefetch server.

pub mod artist_songs;
pub mod search;
pub mod song_lyrics;

use rmcp::{ErrorData as McpError, model::*};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use versefetch_client::{GeniusClient, GeniusError};
use versefetch_core::{AppConfig, Error};

/// Convert a client failure into the MCP error surfaced to callers.
pub(crate) fn tool_error(err: GeniusError) -> McpError {
    Error::from(err).into()
}

/// Authenticated API client bound to the server's shutdown token.
pub(crate) fn genius_client(config: &AppConfig, shutdown: &CancellationToken) -> Result<GeniusClient, McpError> {
    let client = GeniusClient::from_app_config(config).map_err(tool_error)?;
    Ok(client.with_cancellation(shutdown.clone()))
}

/// Render a tool output as pretty JSON text content.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(output).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}
