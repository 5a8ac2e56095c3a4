//! Agent loop limits from TOML (`[agent]` section)

use research_application::AgentParams;
use research_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_steps = 20       # model turns per agent before giving up
/// max_tokens = 8192    # 0 leaves the limit to the provider
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub max_steps: usize,
    pub max_tokens: u32,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let params = AgentParams::default();
        Self {
            max_steps: params.max_steps,
            max_tokens: params.max_tokens.unwrap_or(0),
        }
    }
}

impl FileAgentConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.max_steps == 0 {
            return vec![ConfigIssue::error(
                ConfigIssueCode::InvalidAgentLimit { field: "max_steps" },
                "agent.max_steps must be at least 1",
            )];
        }
        Vec::new()
    }

    pub fn to_agent_params(&self) -> AgentParams {
        AgentParams::default()
            .with_max_steps(self.max_steps)
            .with_max_tokens((self.max_tokens > 0).then_some(self.max_tokens))
    }
}
