//! Pipeline phases

use serde::{Deserialize, Serialize};

/// Phase of a research run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Planner writes the research plan
    Planning,
    /// Splitter decomposes the plan into subtasks
    Decomposition,
    /// Workers research every subtask concurrently
    Research,
    /// Chief editor synthesizes the final report
    Synthesis,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Planning => "planning",
            Phase::Decomposition => "decomposition",
            Phase::Research => "research",
            Phase::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Planning => "Research Plan",
            Phase::Decomposition => "Task Split",
            Phase::Research => "Subagent Research",
            Phase::Synthesis => "Synthesis",
        }
    }

    /// 1-based position in the pipeline
    pub fn ordinal(&self) -> usize {
        match self {
            Phase::Planning => 1,
            Phase::Decomposition => 2,
            Phase::Research => 3,
            Phase::Synthesis => 4,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
