//! Research run configuration.
//!
//! [`ResearchConfig`] is built once at start-up (by the infrastructure config
//! loader) and handed to the use cases by reference. Nothing mutates it
//! during a run.

use crate::use_cases::retry::RetryPolicy;
use research_domain::{ModelRole, ModelSpec};
use serde::{Deserialize, Serialize};

/// Model assignment for each pipeline role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleModels {
    /// Chief editor that synthesizes the final report
    pub coordinator: ModelSpec,
    /// Worker agents, one per subtask
    pub subagent: ModelSpec,
    /// Writes the research plan
    pub planner: ModelSpec,
    /// Decomposes the plan into subtasks
    pub splitter: ModelSpec,
}

impl RoleModels {
    /// Use the same model for every role.
    pub fn uniform(model: ModelSpec) -> Self {
        Self {
            coordinator: model.clone(),
            subagent: model.clone(),
            planner: model.clone(),
            splitter: model,
        }
    }

    pub fn get(&self, role: ModelRole) -> &ModelSpec {
        match role {
            ModelRole::Coordinator => &self.coordinator,
            ModelRole::Subagent => &self.subagent,
            ModelRole::Planner => &self.planner,
            ModelRole::Splitter => &self.splitter,
        }
    }
}

/// Limits for a single research agent's tool loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentParams {
    /// Maximum number of model calls before the agent gives up.
    pub max_steps: usize,
    /// Upper bound on tokens generated per call.
    pub max_tokens: Option<u32>,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            max_steps: 20,
            max_tokens: Some(8192),
        }
    }
}

impl AgentParams {
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    pub fn with_max_tokens(mut self, max: Option<u32>) -> Self {
        self.max_tokens = max;
        self
    }
}

/// Everything a research run needs to know up front.
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    pub models: RoleModels,
    /// Retry policy wrapped around the synthesis step
    pub synthesis_retry: RetryPolicy,
    pub agent: AgentParams,
}

impl ResearchConfig {
    pub fn new(models: RoleModels) -> Self {
        Self {
            models,
            synthesis_retry: RetryPolicy::default(),
            agent: AgentParams::default(),
        }
    }

    pub fn with_synthesis_retry(mut self, policy: RetryPolicy) -> Self {
        self.synthesis_retry = policy;
        self
    }

    pub fn with_agent(mut self, agent: AgentParams) -> Self {
        self.agent = agent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_role_lookup() {
        let models = RoleModels {
            coordinator: ModelSpec::new("big", "auto"),
            subagent: ModelSpec::new("small", "together"),
            planner: ModelSpec::new("planner", "auto"),
            splitter: ModelSpec::new("splitter", "auto"),
        };
        assert_eq!(models.get(ModelRole::Subagent).model_id, "small");
        assert_eq!(models.get(ModelRole::Coordinator).model_id, "big");
        assert_eq!(models.get(ModelRole::Splitter).model_id, "splitter");
    }

    #[test]
    fn test_defaults() {
        let config = ResearchConfig::new(RoleModels::uniform(ModelSpec::auto("m")));
        assert_eq!(config.agent.max_steps, 20);
        assert_eq!(config.agent.max_tokens, Some(8192));
        assert_eq!(config.synthesis_retry.max_retries, 3);
        assert_eq!(config.synthesis_retry.base_delay, Duration::from_secs(10));
    }
}
