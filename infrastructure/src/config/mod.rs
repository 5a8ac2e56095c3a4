//! Configuration file loading for deep-research
//!
//! Sources are merged in this order, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. Global: `$XDG_CONFIG_HOME/deep-research/config.toml`
//! 3. Project root: `./research.toml` or `./.research.toml`
//! 4. `--config <path>` specified file
//! 5. Environment: `DEEP_RESEARCH_<SECTION>__<KEY>`

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, FileAgentConfig, FileConfig, FileFirecrawlConfig, FileHuggingFaceConfig,
    FileModelConfig, FileModelsConfig, FileOutputConfig, FileProvidersConfig, FileRetryConfig,
    FileToolsConfig,
};
pub use loader::ConfigLoader;
