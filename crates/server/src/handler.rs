//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{
    artist_songs::{ArtistSongsParams, artist_songs_impl},
    search::{SearchParams, search_impl},
    song_lyrics::{SongLyricsParams, song_lyrics_impl},
};

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use tokio_util::sync::CancellationToken;
use versefetch_core::AppConfig;

/// The main MCP server handler for versefetch.
#[derive(Clone)]
pub struct VersefetchServer {
    tool_router: ToolRouter<Self>,
    config: Arc<AppConfig>,
    shutdown: CancellationToken,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl VersefetchServer {
    /// Create a new server handler.
    ///
    /// Requests started by any tool are abandoned once `shutdown` fires.
    pub fn new(config: AppConfig, shutdown: CancellationToken) -> Self {
        Self { tool_router: Self::tool_router(), config: Arc::new(config), shutdown }
    }

    /// Fetch the lyrics of a song by Genius id or song page URL.
    #[tool(description = "Fetch song lyrics from Genius. Pass either song_id (needs an access token) or the song page url.")]
    async fn song_lyrics(&self, params: Parameters<SongLyricsParams>) -> Result<CallToolResult, McpError> {
        song_lyrics_impl(&self.config, &self.shutdown, params.0).await
    }

    /// List songs by an artist.
    #[tool(
        description = "List songs by a Genius artist id. Sort by title or popularity; omit limit to fetch every song."
    )]
    async fn artist_songs(&self, params: Parameters<ArtistSongsParams>) -> Result<CallToolResult, McpError> {
        artist_songs_impl(&self.config, &self.shutdown, params.0).await
    }

    /// Search Genius and pick the best match.
    #[tool(description = "Search Genius for songs, artists or albums. Returns the best match and the ranked hits.")]
    async fn search(&self, params: Parameters<SearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.config, &self.shutdown, params.0).await
    }
}

impl ServerHandler for VersefetchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "versefetch".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
