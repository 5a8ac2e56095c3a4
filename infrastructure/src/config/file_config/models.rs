//! Role-based model configuration from TOML (`[models]` section)

use research_domain::{ConfigIssue, ConfigIssueCode, ModelRole, ModelSpec};
use research_application::RoleModels;
use serde::{Deserialize, Serialize};

/// One role's model and inference provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Hub model id (e.g. "Qwen/Qwen3-235B-A22B-Instruct-2507")
    pub model_id: String,
    /// Inference provider ("auto" lets the router choose)
    pub provider: String,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            model_id: String::new(),
            provider: "auto".to_string(),
        }
    }
}

impl FileModelConfig {
    fn new(model_id: &str, provider: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            provider: provider.to_string(),
        }
    }

    pub fn to_model_spec(&self) -> ModelSpec {
        ModelSpec::new(self.model_id.trim(), self.provider.trim())
    }
}

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models.coordinator]
/// model_id = "Qwen/Qwen3-235B-A22B-Instruct-2507"
/// provider = "auto"
///
/// [models.subagent]
/// model_id = "Qwen/Qwen3-30B-A3B-Instruct-2507"
/// provider = "together"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Chief editor (synthesis)
    pub coordinator: FileModelConfig,
    /// Worker agents
    pub subagent: FileModelConfig,
    /// Research plan writer
    pub planner: FileModelConfig,
    /// Plan decomposition (must support JSON schema output)
    pub splitter: FileModelConfig,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            coordinator: FileModelConfig::new("Qwen/Qwen3-235B-A22B-Instruct-2507", "auto"),
            subagent: FileModelConfig::new("Qwen/Qwen3-30B-A3B-Instruct-2507", "auto"),
            planner: FileModelConfig::new("Qwen/Qwen3-235B-A22B-Thinking-2507", "auto"),
            splitter: FileModelConfig::new("Qwen/Qwen3-235B-A22B-Instruct-2507", "auto"),
        }
    }
}

impl FileModelsConfig {
    pub fn get(&self, role: ModelRole) -> &FileModelConfig {
        match role {
            ModelRole::Coordinator => &self.coordinator,
            ModelRole::Subagent => &self.subagent,
            ModelRole::Planner => &self.planner,
            ModelRole::Splitter => &self.splitter,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for role in ModelRole::ALL {
            let model = self.get(role);
            if model.model_id.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelId { role },
                    format!("models.{}.model_id: model id cannot be empty", role.as_str()),
                ));
            }
            if model.provider.trim().is_empty() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyProvider { role },
                    format!(
                        "models.{}.provider is empty, the router will choose a provider",
                        role.as_str()
                    ),
                ));
            }
        }
        issues
    }

    pub fn to_role_models(&self) -> RoleModels {
        RoleModels {
            coordinator: self.coordinator.to_model_spec(),
            subagent: self.subagent.to_model_spec(),
            planner: self.planner.to_model_spec(),
            splitter: self.splitter.to_model_spec(),
        }
    }
}
