//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout. Every section is
//! `#[serde(default)]`, so a file only needs the keys it overrides.

mod agent;
mod models;
mod output;
mod providers;
mod retry;
mod tools;

pub use agent::FileAgentConfig;
pub use models::{FileModelConfig, FileModelsConfig};
pub use output::FileOutputConfig;
pub use providers::{FileHuggingFaceConfig, FileProvidersConfig};
pub use retry::FileRetryConfig;
pub use tools::{FileFirecrawlConfig, FileToolsConfig};

use research_application::{InvalidRetryPolicy, ResearchConfig};
use research_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning configuration sources into a `ResearchConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration ({} error(s))", .0.iter().filter(|i| i.is_error()).count())]
    Invalid(Vec<ConfigIssue>),

    #[error("Invalid retry policy: {0}")]
    Retry(#[from] InvalidRetryPolicy),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model per pipeline role
    pub models: FileModelsConfig,
    /// Synthesis retry policy
    pub retry: FileRetryConfig,
    /// Agent loop limits
    pub agent: FileAgentConfig,
    /// Generation backend settings
    pub providers: FileProvidersConfig,
    /// Search/scrape backend settings
    pub tools: FileToolsConfig,
    /// Report locations
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.validate());
        issues.extend(self.retry.validate());
        issues.extend(self.agent.validate());

        if self.providers.huggingface.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingApiKeyEnv {
                    section: "providers.huggingface",
                },
                "providers.huggingface.api_key_env cannot be empty",
            ));
        }
        if self.tools.firecrawl.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingApiKeyEnv {
                    section: "tools.firecrawl",
                },
                "tools.firecrawl.api_key_env cannot be empty",
            ));
        }

        issues
    }

    /// Build the immutable run configuration.
    ///
    /// Fails with every validation error at once; warnings are not included.
    pub fn to_research_config(&self) -> Result<ResearchConfig, ConfigError> {
        let errors: Vec<ConfigIssue> = self
            .validate()
            .into_iter()
            .filter(ConfigIssue::is_error)
            .collect();
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors));
        }

        Ok(ResearchConfig::new(self.models.to_role_models())
            .with_synthesis_retry(self.retry.to_retry_policy()?)
            .with_agent(self.agent.to_agent_params()))
    }
}
