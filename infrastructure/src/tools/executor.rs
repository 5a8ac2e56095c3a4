//! Web research executor, the concrete implementation of [`ToolExecutorPort`].
//!
//! ```text
//! ToolExecutorPort::execute()
//!   ├─ search_web  → POST /search
//!   ├─ scrape_url  → POST /scrape
//!   └─ otherwise   → NOT_FOUND tool error
//! ```

use super::web::{
    FirecrawlClient, FirecrawlError, SCRAPE_URL, SEARCH_WEB, execute_scrape_url,
    execute_search_web, scrape_url_definition, search_web_definition,
};
use crate::config::FileFirecrawlConfig;
use async_trait::async_trait;
use research_application::ToolExecutorPort;
use research_domain::tool::{
    entities::{ToolCall, ToolSpec},
    value_objects::{ToolError, ToolResult},
};

/// Tool set shared by every research agent.
pub fn research_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(search_web_definition())
        .register(scrape_url_definition())
}

/// Executor for the Firecrawl-backed research tools
#[derive(Debug, Clone)]
pub struct FirecrawlToolExecutor {
    tool_spec: ToolSpec,
    client: FirecrawlClient,
    search_limit: u32,
    scrape_max_chars: usize,
}

impl FirecrawlToolExecutor {
    pub fn new(client: FirecrawlClient) -> Self {
        let defaults = FileFirecrawlConfig::default();
        Self {
            tool_spec: research_tool_spec(),
            client,
            search_limit: defaults.search_limit,
            scrape_max_chars: defaults.scrape_max_chars,
        }
    }

    /// Build from `[tools.firecrawl]`, reading the API key from the environment.
    pub fn from_config(config: &FileFirecrawlConfig) -> Result<Self, FirecrawlError> {
        Ok(Self::new(FirecrawlClient::from_config(config)?)
            .with_search_limit(config.search_limit)
            .with_scrape_max_chars(config.scrape_max_chars))
    }

    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    pub fn with_scrape_max_chars(mut self, max_chars: usize) -> Self {
        self.scrape_max_chars = max_chars;
        self
    }
}

#[async_trait]
impl ToolExecutorPort for FirecrawlToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        match call.tool_name.as_str() {
            SEARCH_WEB => execute_search_web(&self.client, call, self.search_limit).await,
            SCRAPE_URL => execute_scrape_url(&self.client, call, self.scrape_max_chars).await,
            other => ToolResult::failure(other, ToolError::not_found(other)),
        }
    }
}
