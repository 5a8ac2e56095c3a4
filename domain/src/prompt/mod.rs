//! Prompt domain
//!
//! Templates for the prompts sent at each stage of a research run.

mod template;

pub use template::PromptTemplate;
