//! **Web Tools**: `search_web` and `scrape_url`
//!
//! | Tool | Endpoint | Output |
//! |------|----------|--------|
//! | `search_web` | `POST /search` | markdown list of hits, or `No results found.` |
//! | `scrape_url` | `POST /scrape` | page markdown, truncated past the configured limit |
//!
//! Both go through a shared [`FirecrawlClient`] with bearer authentication.

mod client;
mod scrape;
mod search;

pub use client::{FirecrawlClient, FirecrawlError};
pub use scrape::{SCRAPE_URL, execute_scrape_url, format_scraped, scrape_url_definition};
pub use search::{
    SEARCH_WEB, SearchHit, execute_search_web, format_search_results, search_web_definition,
};
