//! `search_web` tool: web search through Firecrawl `POST /search`.
//!
//! Each hit is rendered as a markdown block with the title, URL,
//! description and the first 500 characters of the page markdown.

use super::client::FirecrawlClient;
use research_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use research_domain::util::truncate_chars;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

pub const SEARCH_WEB: &str = "search_web";

/// Characters of page markdown kept per hit.
const EXCERPT_CHARS: usize = 500;
/// Upper bound on a model-requested result count.
const MAX_LIMIT: u32 = 20;

pub fn search_web_definition() -> ToolDefinition {
    ToolDefinition::new(
        SEARCH_WEB,
        "Search the web for information. Returns titles, URLs, descriptions and page excerpts.",
    )
    .with_parameter(ToolParameter::new("query", "The search query", true))
    .with_parameter(
        ToolParameter::new("limit", "Max number of results (default 5)", false)
            .with_type("integer"),
    )
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    limit: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: SearchData,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub web: Vec<SearchHit>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
}

/// Resolve the result count: the model's value if sane, else the default.
fn resolve_limit(call: &ToolCall, default_limit: u32) -> u32 {
    match call.get_i64("limit") {
        Some(n) if n >= 1 => (n as u64).min(MAX_LIMIT as u64) as u32,
        _ => default_limit,
    }
}

pub async fn execute_search_web(
    client: &FirecrawlClient,
    call: &ToolCall,
    default_limit: u32,
) -> ToolResult {
    let start = Instant::now();

    let query = match call.require_string("query") {
        Ok(q) => q,
        Err(e) => return ToolResult::failure(SEARCH_WEB, ToolError::invalid_argument(e)),
    };
    let limit = resolve_limit(call, default_limit);
    debug!(query, limit, "search_web");

    let response: SearchResponse = match client
        .post("search", &SearchRequest { query, limit })
        .await
    {
        Ok(r) => r,
        Err(e) => {
            return ToolResult::failure(SEARCH_WEB, ToolError::execution_failed(e.to_string()));
        }
    };

    let hits = response.data.web.len();
    ToolResult::success(SEARCH_WEB, format_search_results(&response.data.web))
        .with_match_count(hits)
        .with_duration(start.elapsed().as_millis() as u64)
}

/// Render hits as markdown blocks separated by `---`.
pub fn format_search_results(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No results found.".to_string();
    }

    hits.iter()
        .map(|hit| {
            let title = hit
                .title
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or("No title");
            let url = hit.url.as_deref().unwrap_or("");
            let description = hit.description.as_deref().unwrap_or("");
            let excerpt = truncate_chars(hit.markdown.as_deref().unwrap_or(""), EXCERPT_CHARS).0;
            format!("## {}\nURL: {}\n{}\n{}\n", title, url, description, excerpt)
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}
