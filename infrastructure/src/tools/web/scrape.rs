//! `scrape_url` tool: page content as markdown through Firecrawl `POST /scrape`.

use super::client::FirecrawlClient;
use research_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use research_domain::util::truncate_chars;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

pub const SCRAPE_URL: &str = "scrape_url";

const TRUNCATION_NOTICE: &str = "\n\n[Content truncated...]";

pub fn scrape_url_definition() -> ToolDefinition {
    ToolDefinition::new(
        SCRAPE_URL,
        "Scrape a webpage and return its content as markdown.",
    )
    .with_parameter(ToolParameter::new("url", "The URL to scrape", true))
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 1],
}

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub data: Option<ScrapeData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeData {
    #[serde(default)]
    pub markdown: Option<String>,
}

pub async fn execute_scrape_url(
    client: &FirecrawlClient,
    call: &ToolCall,
    max_chars: usize,
) -> ToolResult {
    let start = Instant::now();

    let url = match call.require_string("url") {
        Ok(u) => u,
        Err(e) => return ToolResult::failure(SCRAPE_URL, ToolError::invalid_argument(e)),
    };
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return ToolResult::failure(
            SCRAPE_URL,
            ToolError::invalid_argument(format!("Not an http(s) URL: {}", url)),
        );
    }
    debug!(url, "scrape_url");

    let response: ScrapeResponse = match client
        .post(
            "scrape",
            &ScrapeRequest {
                url,
                formats: ["markdown"],
            },
        )
        .await
    {
        Ok(r) => r,
        Err(e) => {
            return ToolResult::failure(SCRAPE_URL, ToolError::execution_failed(e.to_string()));
        }
    };

    let markdown = response.data.and_then(|d| d.markdown).unwrap_or_default();
    let (content, truncated) = format_scraped(url, &markdown, max_chars);
    ToolResult::success(SCRAPE_URL, content)
        .with_truncated(truncated)
        .with_duration(start.elapsed().as_millis() as u64)
}

/// Page markdown capped at `max_chars`, or a notice when the page was empty.
pub fn format_scraped(url: &str, markdown: &str, max_chars: usize) -> (String, bool) {
    if markdown.is_empty() {
        return (format!("Failed to scrape {}", url), false);
    }
    match truncate_chars(markdown, max_chars) {
        (head, true) => (format!("{}{}", head, TRUNCATION_NOTICE), true),
        (all, false) => (all.to_string(), false),
    }
}
