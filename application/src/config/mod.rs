//! Application-level configuration.
//!
//! - [`ResearchConfig`] - models, agent limits and retry policy for a run
//! - [`RoleModels`] - which model serves which pipeline role
//! - [`AgentParams`] - tool-loop limits for a single agent

pub mod research_config;

pub use research_config::{AgentParams, ResearchConfig, RoleModels};
