//! Research tool configuration from TOML (`[tools]` section)

use serde::{Deserialize, Serialize};

/// Firecrawl search/scrape backend settings
///
/// ```toml
/// [tools.firecrawl]
/// api_key_env = "FIRECRAWL_API_KEY"
/// search_limit = 5
/// scrape_max_chars = 10000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFirecrawlConfig {
    pub api_key_env: String,
    pub base_url: String,
    /// Default number of results for `search_web`
    pub search_limit: u32,
    /// Scraped pages longer than this are truncated
    pub scrape_max_chars: usize,
    pub timeout_secs: u64,
}

impl Default for FileFirecrawlConfig {
    fn default() -> Self {
        Self {
            api_key_env: "FIRECRAWL_API_KEY".to_string(),
            base_url: "https://api.firecrawl.dev/v2".to_string(),
            search_limit: 5,
            scrape_max_chars: 10_000,
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    pub firecrawl: FileFirecrawlConfig,
}
