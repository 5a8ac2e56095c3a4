//! Infrastructure layer for deep-research
//!
//! Adapters for the application ports: the Hugging Face generation gateway,
//! Firecrawl web tools, the filesystem report store and the JSONL
//! transcript, plus configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod report;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::HuggingFaceGateway;
pub use report::FsReportStore;
pub use tools::{FirecrawlClient, FirecrawlError, FirecrawlToolExecutor, research_tool_spec};
