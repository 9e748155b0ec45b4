//! Backoff decisions for throttled responses.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

/// Wait applied when a throttled response carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(5);

/// Standard rate limiting.
pub const TOO_MANY_REQUESTS: u16 = 429;

/// Edge-network challenge status used by the platform's CDN.
pub const EDGE_BLOCKED: u16 = 1015;

/// Whether a status means "slow down and replay the same request".
pub fn is_throttled(status: u16) -> bool {
    status == TOO_MANY_REQUESTS || status == EDGE_BLOCKED
}

/// Wait derived from the `Retry-After` header, read as whole seconds.
///
/// Falls back to `fallback` when the header is missing or not an integer.
pub fn retry_after(headers: &HeaderMap, fallback: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .map(|secs| Duration::from_secs(u64::from(secs)))
        .unwrap_or(fallback)
}
