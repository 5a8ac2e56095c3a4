//! Filesystem report store
//!
//! Layout of one run:
//!
//! ```text
//! <reports_dir>/<YYYYmmdd_HHMMSS>/
//! ├── final_report.md
//! └── subagents/
//!     └── <id>_<normalized title>.md
//! ```
//!
//! Names are capped in length; two subtasks mapping to the same name get a
//! `_2`, `_3`, ... suffix.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use research_application::{ReportStore, ReportStoreError, SavedReport};
use research_domain::util::{normalize_title, truncate_bytes};
use research_domain::{ResearchOutcome, SubtaskResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const FINAL_REPORT_FILE: &str = "final_report.md";
const SUBAGENTS_DIR: &str = "subagents";
/// Leaves room for a collision suffix and the extension within 255 bytes.
const MAX_STEM_BYTES: usize = 200;

/// `ReportStore` writing markdown files under a timestamped run directory
///
/// The run directory is fixed when the store is created, so other run
/// artifacts (such as the transcript) can be placed next to the reports.
#[derive(Debug, Clone)]
pub struct FsReportStore {
    run_dir: PathBuf,
}

impl FsReportStore {
    pub fn new(reports_dir: impl AsRef<Path>) -> Self {
        Self::at(reports_dir, Local::now())
    }

    /// Store whose run directory is named after `started_at`.
    pub fn at(reports_dir: impl AsRef<Path>, started_at: DateTime<Local>) -> Self {
        Self {
            run_dir: reports_dir
                .as_ref()
                .join(started_at.format(TIMESTAMP_FORMAT).to_string()),
        }
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }
}

/// File name of a subagent report: `<id>_<normalized title>.md`.
///
/// Path separators are replaced so a title can never leave the directory.
pub fn subagent_file_name(result: &SubtaskResult) -> String {
    format!("{}.md", subagent_file_stem(result))
}

fn subagent_file_stem(result: &SubtaskResult) -> String {
    let stem = format!("{}_{}", result.id, normalize_title(&result.title));
    let stem = stem.replace(['/', '\\'], "_");
    truncate_bytes(&stem, MAX_STEM_BYTES).to_string()
}

/// Hands out subagent file names that are unique within one run.
///
/// Comparison ignores case so reports survive case-insensitive filesystems.
#[derive(Debug, Default)]
struct FileNames {
    taken: HashSet<String>,
}

impl FileNames {
    fn claim(&mut self, result: &SubtaskResult) -> String {
        let stem = subagent_file_stem(result);
        let mut name = format!("{}.md", stem);
        let mut n = 2;
        while !self.taken.insert(name.to_lowercase()) {
            name = format!("{}_{}.md", stem, n);
            n += 1;
        }
        name
    }
}

/// Markdown body of a subagent report.
pub fn subagent_document(result: &SubtaskResult) -> String {
    format!(
        "# {}\n\n**Subtask ID:** {}\n\n---\n\n{}",
        result.title, result.id, result.result
    )
}

async fn create_dir(path: &Path) -> Result<(), ReportStoreError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| ReportStoreError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
}

async fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf, ReportStoreError> {
    match tokio::fs::write(&path, contents).await {
        Ok(()) => Ok(path),
        Err(source) => Err(ReportStoreError::Write { path, source }),
    }
}

#[async_trait]
impl ReportStore for FsReportStore {
    async fn save(&self, outcome: &ResearchOutcome) -> Result<SavedReport, ReportStoreError> {
        let subagents_dir = self.run_dir.join(SUBAGENTS_DIR);
        create_dir(&subagents_dir).await?;

        let final_report = write_file(
            self.run_dir.join(FINAL_REPORT_FILE),
            outcome.report.content(),
        )
        .await?;
        info!("Final report saved to {}", final_report.display());

        let mut names = FileNames::default();
        let mut subagent_reports = Vec::with_capacity(outcome.results.len());
        for result in &outcome.results {
            let path = subagents_dir.join(names.claim(result));
            subagent_reports.push(write_file(path, &subagent_document(result)).await?);
        }
        info!("Subagent reports saved to {}", subagents_dir.display());

        Ok(SavedReport {
            run_dir: self.run_dir.clone(),
            final_report,
            subagent_reports,
        })
    }
}
