//! Use cases for the research pipeline

pub mod dispatch;
pub mod generate_plan;
pub mod research_agent;
pub mod retry;
pub mod run_research;
pub mod split_tasks;
pub mod synthesize;

#[cfg(test)]
pub(crate) mod test_support;
