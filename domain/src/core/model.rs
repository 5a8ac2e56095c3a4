//! Model value objects: which model runs which pipeline role

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Provider value meaning "let the backend pick".
const AUTO_PROVIDER: &str = "auto";

/// A model id bound to the inference provider that serves it (Value Object)
///
/// The same model id may be served by several providers; the pair is what
/// the generation backend needs to route a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model identifier (e.g. "Qwen/Qwen3-235B-A22B-Instruct-2507")
    pub model_id: String,
    /// Inference provider (e.g. "cerebras", "together", "auto")
    pub provider: String,
}

impl ModelSpec {
    pub fn new(model_id: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            provider: provider.into(),
        }
    }

    /// Create a spec that leaves provider selection to the backend.
    pub fn auto(model_id: impl Into<String>) -> Self {
        Self::new(model_id, AUTO_PROVIDER)
    }

    /// Returns `true` when no explicit provider is pinned.
    pub fn is_auto_provider(&self) -> bool {
        let provider = self.provider.trim();
        provider.is_empty() || provider.eq_ignore_ascii_case(AUTO_PROVIDER)
    }

    /// Model name with the provider suffix used by routing backends
    /// (`model_id:provider`), or the bare model id for automatic routing.
    pub fn routed_name(&self) -> String {
        if self.is_auto_provider() {
            self.model_id.clone()
        } else {
            format!("{}:{}", self.model_id, self.provider.trim())
        }
    }
}

impl std::fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.model_id, self.provider)
    }
}

/// Pipeline role a model is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelRole {
    /// Chief editor: synthesizes the final report
    Coordinator,
    /// Research worker: one per subtask
    Subagent,
    /// Writes the research plan
    Planner,
    /// Decomposes the plan into subtasks
    Splitter,
}

impl ModelRole {
    pub const ALL: [ModelRole; 4] = [
        ModelRole::Coordinator,
        ModelRole::Subagent,
        ModelRole::Planner,
        ModelRole::Splitter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::Coordinator => "coordinator",
            ModelRole::Subagent => "subagent",
            ModelRole::Planner => "planner",
            ModelRole::Splitter => "splitter",
        }
    }
}

impl std::fmt::Display for ModelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coordinator" => Ok(ModelRole::Coordinator),
            "subagent" => Ok(ModelRole::Subagent),
            "planner" => Ok(ModelRole::Planner),
            "splitter" => Ok(ModelRole::Splitter),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}
