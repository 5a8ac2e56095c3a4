//! Report persistence port

use async_trait::async_trait;
use research_domain::ResearchOutcome;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportStoreError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where a run's reports ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    /// Per-run directory (`<reports_dir>/<timestamp>`)
    pub run_dir: PathBuf,
    /// The synthesized report
    pub final_report: PathBuf,
    /// One file per subtask, in result order
    pub subagent_reports: Vec<PathBuf>,
}

/// Persists the final report and every subtask report of a run.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn save(&self, outcome: &ResearchOutcome) -> Result<SavedReport, ReportStoreError>;
}
