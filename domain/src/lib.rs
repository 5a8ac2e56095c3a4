//! Domain layer for deep-research
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Research pipeline
//!
//! A [`Query`] is turned into a [`ResearchPlan`], the plan is decomposed into
//! independent [`Subtask`]s, one worker researches each subtask and produces a
//! [`SubtaskResult`], and all results are synthesized into a [`FinalReport`].
//!
//! ## Roles
//!
//! Each pipeline stage runs on its own model, selected per [`ModelRole`]:
//!
//! - **Planner**: writes the research plan
//! - **Splitter**: decomposes the plan into subtasks (schema-constrained)
//! - **Subagent**: researches one subtask with the web tools
//! - **Coordinator**: the chief editor that synthesizes the final report

pub mod config;
pub mod core;
pub mod prompt;
pub mod research;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use config::validation::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    error::DomainError,
    model::{ModelRole, ModelSpec},
    query::Query,
};
pub use prompt::PromptTemplate;
pub use research::{
    decomposition::{DecompositionError, parse_subtask_list, subtask_list_schema},
    entities::{FinalReport, ResearchPlan, Subtask},
    phase::Phase,
    value_objects::{ResearchOutcome, SubtaskResult, combine_reports, sort_results},
};
pub use session::{
    entities::{Message, Role},
    response::{ContentBlock, LlmResponse, StopReason},
    schema::ResponseSchema,
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
