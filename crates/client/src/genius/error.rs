//! Genius client error types.

use std::sync::Arc;

/// Errors from the Genius API client, the request executor and the lyrics
/// extractor.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeniusError {
    /// No API access token configured.
    #[error("missing access token: VERSEFETCH_ACCESS_TOKEN not set")]
    MissingToken,

    /// Invalid caller-supplied parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Connection, TLS or DNS failure. Never retried.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Non-200, non-throttled response; `body` is the raw upstream payload.
    #[error("upstream error {status} from {url}: {body}")]
    Upstream { status: u16, url: String, body: String },

    /// JSON envelope could not be decoded.
    #[error("decode error ({context}): {message}")]
    Decode { context: String, message: String },

    /// Page markup could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Decoded envelope lacks the requested resource.
    #[error("resource not found: {resource}")]
    NotFound { resource: String },

    /// No `lyrics-root` container in the page markup.
    #[error("lyrics container not found in page markup")]
    ContainerNotFound,

    /// Response body exceeded the configured limit.
    #[error("response too large: {size} bytes exceeds {limit}")]
    TooLarge { size: usize, limit: usize },

    /// Cancelled while waiting on the network or a backoff.
    #[error("operation cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for GeniusError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { GeniusError::Timeout } else { GeniusError::Network(Arc::new(err)) }
    }
}

impl From<GeniusError> for versefetch_core::Error {
    fn from(err: GeniusError) -> Self {
        use versefetch_core::Error;

        match err {
            GeniusError::MissingToken => Error::Config(err.to_string()),
            GeniusError::InvalidInput(msg) => Error::InvalidInput(msg),
            GeniusError::Network(e) => Error::Transport(e.to_string()),
            GeniusError::Timeout => Error::Timeout(err.to_string()),
            GeniusError::Upstream { status, body, .. } => Error::Upstream { status, body },
            GeniusError::Decode { .. } | GeniusError::Parse(_) => Error::Decode(err.to_string()),
            GeniusError::NotFound { resource } => Error::NotFound(resource),
            GeniusError::ContainerNotFound => Error::LyricsNotFound(err.to_string()),
            GeniusError::TooLarge { .. } => Error::TooLarge(err.to_string()),
            GeniusError::Cancelled => Error::Cancelled,
        }
    }
}
