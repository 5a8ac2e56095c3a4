//! Research value objects - immutable result types for a research run.
//!
//! - [`SubtaskResult`] - one worker's output (or its error notice)
//! - [`ResearchOutcome`] - everything a run produced, handed to persistence

use super::entities::{FinalReport, ResearchPlan, Subtask};
use crate::core::query::Query;
use serde::{Deserialize, Serialize};

/// Separator placed between subtask sections in the combined report.
const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Result of researching a single subtask
///
/// Exactly one is produced per subtask. A failed worker still yields a
/// result: `failed` is set and `result` carries the error description, so
/// the synthesis step sees it as clearly labelled content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskResult {
    /// Id of the subtask this result belongs to
    pub id: String,
    /// Title of the subtask
    pub title: String,
    /// Worker report, or a human-readable error notice when `failed`
    pub result: String,
    /// Whether the worker failed
    pub failed: bool,
}

impl SubtaskResult {
    /// Creates a successful result for a subtask.
    pub fn success(subtask: &Subtask, result: impl Into<String>) -> Self {
        Self {
            id: subtask.id.clone(),
            title: subtask.title.clone(),
            result: result.into(),
            failed: false,
        }
    }

    /// Creates a failed result whose text embeds the error description.
    pub fn failure(subtask: &Subtask, error: impl std::fmt::Display) -> Self {
        Self {
            id: subtask.id.clone(),
            title: subtask.title.clone(),
            result: format!("Error: {}", error),
            failed: true,
        }
    }

    /// Returns `true` if the worker completed successfully.
    pub fn is_success(&self) -> bool {
        !self.failed
    }

    /// Render this result as a labelled markdown section.
    pub fn to_section(&self) -> String {
        format!(
            "## Subtask: {} (ID: {})\n\n{}",
            self.title, self.id, self.result
        )
    }
}

/// Sort results ascending by subtask id (lexicographic on the string).
///
/// This is the only ordering the pipeline guarantees; it makes the report
/// structure independent of worker completion order.
pub fn sort_results(results: &mut [SubtaskResult]) {
    results.sort_by(|a, b| a.id.cmp(&b.id));
}

/// Combine every result (successes and failures) into one document, in the
/// order given.
pub fn combine_reports(results: &[SubtaskResult]) -> String {
    results
        .iter()
        .map(SubtaskResult::to_section)
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

/// Complete result of a research run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchOutcome {
    /// The original query
    pub query: Query,
    /// The plan produced by the planner
    pub plan: ResearchPlan,
    /// Per-subtask results, sorted by id
    pub results: Vec<SubtaskResult>,
    /// The synthesized report
    pub report: FinalReport,
}

impl ResearchOutcome {
    pub fn new(
        query: Query,
        plan: ResearchPlan,
        results: Vec<SubtaskResult>,
        report: FinalReport,
    ) -> Self {
        Self {
            query,
            plan,
            results,
            report,
        }
    }

    /// Returns an iterator over only the successful subtask results.
    pub fn successful_results(&self) -> impl Iterator<Item = &SubtaskResult> {
        self.results.iter().filter(|r| !r.failed)
    }

    /// Returns an iterator over only the failed subtask results.
    pub fn failed_results(&self) -> impl Iterator<Item = &SubtaskResult> {
        self.results.iter().filter(|r| r.failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtask(id: &str, title: &str) -> Subtask {
        Subtask::new(id, title, format!("Research {}", title))
    }

    #[test]
    fn test_failure_embeds_error_text() {
        let result = SubtaskResult::failure(&subtask("B", "Nationalisation"), "rate limited");
        assert!(result.failed);
        assert!(!result.is_success());
        assert_eq!(result.result, "Error: rate limited");
        assert_eq!(result.id, "B");
        assert_eq!(result.title, "Nationalisation");
    }

    #[test]
    fn test_sort_results_by_id() {
        let mut results = vec![
            SubtaskResult::success(&subtask("C", "c"), "c"),
            SubtaskResult::success(&subtask("A", "a"), "a"),
            SubtaskResult::failure(&subtask("B", "b"), "boom"),
        ];
        sort_results(&mut results);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sort_is_lexicographic_not_numeric() {
        let mut results = vec![
            SubtaskResult::success(&subtask("2", "two"), ""),
            SubtaskResult::success(&subtask("10", "ten"), ""),
            SubtaskResult::success(&subtask("1", "one"), ""),
        ];
        sort_results(&mut results);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "10", "2"]);
    }

    #[test]
    fn test_combine_reports_format() {
        let results = vec![
            SubtaskResult::success(&subtask("A", "Origins"), "Dug in 1859."),
            SubtaskResult::failure(&subtask("B", "Crisis"), "timeout"),
        ];
        let combined = combine_reports(&results);
        assert_eq!(
            combined,
            "## Subtask: Origins (ID: A)\n\nDug in 1859.\n\n---\n\n## Subtask: Crisis (ID: B)\n\nError: timeout"
        );
    }

    #[test]
    fn test_combine_reports_empty() {
        assert_eq!(combine_reports(&[]), "");
    }

    #[test]
    fn test_outcome_partitions_results() {
        let outcome = ResearchOutcome::new(
            Query::try_new("q").unwrap(),
            ResearchPlan::new("plan"),
            vec![
                SubtaskResult::success(&subtask("A", "a"), "ok"),
                SubtaskResult::failure(&subtask("B", "b"), "boom"),
            ],
            FinalReport::new("report"),
        );
        assert_eq!(outcome.successful_results().count(), 1);
        assert_eq!(outcome.failed_results().count(), 1);
    }
}
