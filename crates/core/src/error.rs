//! Unified error types for versefetch.
//!
//! Each variant renders as `CODE: detail` and maps onto a JSON-RPC error code
//! when surfaced through the MCP server.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the versefetch server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., neither song id nor url given).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or is incomplete.
    #[error("CONFIG_ERROR: {0}")]
    Config(String),

    /// Connection, TLS or DNS failure talking to upstream.
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(String),

    /// Request timed out.
    #[error("FETCH_TIMEOUT: {0}")]
    Timeout(String),

    /// Upstream answered with a non-200 status.
    #[error("UPSTREAM_ERROR: {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Response body could not be decoded.
    #[error("DECODE_ERROR: {0}")]
    Decode(String),

    /// Response body exceeded the configured size limit.
    #[error("FETCH_TOO_LARGE: {0}")]
    TooLarge(String),

    /// Decoded envelope did not contain the requested resource.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Lyric container was absent from the song page markup.
    #[error("LYRICS_NOT_FOUND: {0}")]
    LyricsNotFound(String),

    /// Operation was cancelled before completion.
    #[error("CANCELLED")]
    Cancelled,
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::Config(msg) => (-32001, msg.clone()),
            Error::Transport(msg) => (-32002, msg.clone()),
            Error::Timeout(msg) => (-32003, msg.clone()),
            Error::Upstream { status, body } => (-32004, format!("status {status}: {body}")),
            Error::Decode(msg) => (-32005, msg.clone()),
            Error::TooLarge(msg) => (-32006, msg.clone()),
            Error::NotFound(msg) => (-32007, msg.clone()),
            Error::LyricsNotFound(msg) => (-32008, msg.clone()),
            Error::Cancelled => (-32009, "operation cancelled".to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("song 42".to_string());
        assert!(err.to_string().contains("NOT_FOUND"));
        assert!(err.to_string().contains("song 42"));
    }

    #[test]
    fn test_upstream_display_carries_body() {
        let err = Error::Upstream { status: 500, body: "{\"error\":\"boom\"}".to_string() };
        assert_eq!(err.to_string(), "UPSTREAM_ERROR: 500: {\"error\":\"boom\"}");
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::NotFound("song 42".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32007);

        let mcp_err: McpError = Error::InvalidInput("missing id".into()).into();
        assert_eq!(mcp_err.code.0, -32602);
        assert_eq!(mcp_err.message, "missing id");
    }
}
