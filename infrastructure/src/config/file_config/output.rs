//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where reports and transcripts are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Root of the timestamped run directories
    pub reports_dir: PathBuf,
    /// Copy of the final report written after a successful run
    pub result_file: PathBuf,
    /// Record a JSONL transcript inside the run directory
    pub transcript: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            result_file: PathBuf::from("research_result.md"),
            transcript: false,
        }
    }
}
