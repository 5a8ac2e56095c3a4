//! Research artifacts produced once per run and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Free-text research plan written by the planner model.
///
/// Treated as opaque by every consumer; no length validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchPlan {
    content: String,
}

impl ResearchPlan {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl std::fmt::Display for ResearchPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// One independently researchable unit derived from the plan.
///
/// Constructed only through [`parse_subtask_list`](super::decomposition::parse_subtask_list)
/// in production, which guarantees non-empty fields and unique ids within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    /// Short identifier, unique within a batch (e.g. "A", "history")
    pub id: String,
    /// Short descriptive title
    pub title: String,
    /// Detailed instructions for the worker
    pub description: String,
}

impl Subtask {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The synthesized report, the only artifact that leaves the pipeline
/// together with the per-subtask results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    content: String,
}

impl FinalReport {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for FinalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_plan() {
        assert!(ResearchPlan::new("  \n").is_blank());
        assert!(!ResearchPlan::new("1. Look at sources").is_blank());
    }

    #[test]
    fn test_subtask_serde_shape() {
        let subtask = Subtask::new("A", "Construction", "Research the construction era");
        let json = serde_json::to_value(&subtask).unwrap();
        assert_eq!(json["id"], "A");
        assert_eq!(json["title"], "Construction");
        assert_eq!(json["description"], "Research the construction era");
    }
}
