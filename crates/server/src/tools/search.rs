//! search tool implementation.
//!
//! Runs a multi-section search and picks the hit whose name matches the query.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use versefetch_client::HitKind;
use versefetch_client::genius::HitResult;
use versefetch_core::{AppConfig, Error};

use super::{genius_client, json_result, tool_error};

/// Input parameters for search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search query (required).
    pub query: String,

    /// What to look for: "song" (default), "artist" or "album".
    #[serde(default)]
    pub kind: Option<String>,

    /// Hits per section (1-50, default 5).
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Output structure for search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchOutput {
    pub query: String,
    pub kind: String,
    /// Hit whose name equals the query, else the top-ranked hit.
    pub best: HitSummary,
    /// All hits of the requested kind, in ranked order.
    pub hits: Vec<HitSummary>,
}

/// Condensed search hit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HitSummary {
    pub id: u64,
    pub name: String,
    pub url: String,
}

impl HitSummary {
    fn new(result: &HitResult, kind: HitKind) -> Self {
        Self {
            id: result.id,
            name: result.display_name(kind).unwrap_or_default().to_string(),
            url: result.url.clone(),
        }
    }
}

fn parse_kind(kind: Option<&str>) -> Result<HitKind, Error> {
    match kind {
        Some("song") | None => Ok(HitKind::Song),
        Some("artist") => Ok(HitKind::Artist),
        Some("album") => Ok(HitKind::Album),
        Some(other) => Err(Error::InvalidInput(format!("invalid kind: {other}"))),
    }
}

/// Implementation of the search tool.
pub async fn search_impl(
    config: &AppConfig, shutdown: &CancellationToken, params: SearchParams,
) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()).into());
    }

    let kind = parse_kind(params.kind.as_deref())?;

    let per_page = params.per_page.unwrap_or(5);
    if !(1..=50).contains(&per_page) {
        return Err(Error::InvalidInput(format!("per_page must be between 1 and 50, got {per_page}")).into());
    }

    let client = genius_client(config, shutdown)?;
    let sections = client.search_multi(&params.query, per_page).await.map_err(tool_error)?;
    let best = sections.best_match(kind, &params.query).map_err(tool_error)?;

    let output = SearchOutput {
        best: HitSummary::new(best, kind),
        hits: sections
            .hits_of(kind)
            .into_iter()
            .map(|hit| HitSummary::new(&hit.result, kind))
            .collect(),
        kind: kind.as_str().to_string(),
        query: params.query,
    };

    json_result(&output)
}
