//! Research tools available to agents

mod executor;
pub mod web;

pub use executor::{FirecrawlToolExecutor, research_tool_spec};
pub use web::{FirecrawlClient, FirecrawlError};
