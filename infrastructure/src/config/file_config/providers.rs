//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Hugging Face inference router settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHuggingFaceConfig {
    /// Environment variable holding the access token (default: "HF_TOKEN").
    pub api_key_env: String,
    /// OpenAI-compatible router endpoint.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileHuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_key_env: "HF_TOKEN".to_string(),
            base_url: "https://router.huggingface.co/v1".to_string(),
            timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub huggingface: FileHuggingFaceConfig,
}
