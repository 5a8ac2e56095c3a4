//! Presentation layer for deep-research
//!
//! This crate contains the CLI definition, interactive query input,
//! progress reporters and console output formatting.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use cli::input::prompt_query;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
