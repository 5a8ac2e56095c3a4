//! Console output formatter for research runs

use colored::Colorize;
use research_application::RunResearchOutput;
use research_domain::{ConfigIssue, ResearchPlan, Subtask};
use std::path::Path;
use std::time::Duration;

/// Formats run artifacts for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_plan(plan: &ResearchPlan) -> String {
        format!(
            "{}\n{}\n",
            Self::section_header("Research Plan"),
            Self::indent(plan.content(), "  ")
        )
    }

    pub fn format_subtasks(subtasks: &[Subtask]) -> String {
        let mut output = Self::section_header(&format!("Subtasks ({})", subtasks.len()));
        for subtask in subtasks {
            output.push_str(&format!(
                "  {} {}\n",
                format!("[{}]", subtask.id).yellow().bold(),
                subtask.title
            ));
        }
        output
    }

    pub fn format_retry(attempt: u32, max_retries: u32, delay: Duration, error: &str) -> String {
        format!(
            "{} synthesis attempt {}/{} failed: {} (retrying in {}s)",
            "!".yellow().bold(),
            attempt,
            max_retries,
            error,
            delay.as_secs_f64()
        )
    }

    /// One line per configuration issue, errors in red.
    pub fn format_config_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| {
                if issue.is_error() {
                    format!("{} {}", "error:".red().bold(), issue.message)
                } else {
                    format!("{} {}", "warning:".yellow().bold(), issue.message)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run summary: subtask outcomes and where the reports went.
    pub fn format_summary(output: &RunResearchOutput, result_file: &Path) -> String {
        let outcome = &output.outcome;
        let succeeded = outcome.successful_results().count();
        let failed = outcome.failed_results().count();

        let mut text = String::new();
        text.push_str(&Self::header("Research Complete"));
        text.push('\n');
        text.push_str(&format!(
            "{} {}\n\n",
            "Query:".cyan().bold(),
            outcome.query.content()
        ));
        text.push_str(&format!(
            "{} {} succeeded, {} failed\n",
            "Subtasks:".cyan().bold(),
            succeeded.to_string().green(),
            if failed > 0 {
                failed.to_string().red()
            } else {
                failed.to_string().normal()
            }
        ));
        for result in outcome.failed_results() {
            text.push_str(&format!(
                "  {} {}: {}\n",
                "x".red(),
                result.id,
                Self::first_line(&result.result)
            ));
        }

        text.push_str(&format!(
            "\n{} {}\n",
            "Run directory:".cyan().bold(),
            output.saved.run_dir.display()
        ));
        text.push_str(&format!(
            "{} {}\n",
            "Final report:".cyan().bold(),
            output.saved.final_report.display()
        ));
        text.push_str(&format!(
            "{} {}\n",
            "Result file:".cyan().bold(),
            result_file.display()
        ));
        text.push_str(&Self::footer());
        text
    }

    fn first_line(text: &str) -> &str {
        text.lines().next().unwrap_or("")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_application::SavedReport;
    use research_domain::{
        ConfigIssueCode, FinalReport, ModelRole, Query, ResearchOutcome, SubtaskResult,
    };
    use std::path::PathBuf;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_subtask_listing() {
        plain();
        let text = ConsoleFormatter::format_subtasks(&[
            Subtask::new("A", "Construction", "d"),
            Subtask::new("B", "Suez Crisis", "d"),
        ]);
        assert!(text.contains("Subtasks (2)"));
        assert!(text.contains("  [A] Construction\n"));
        assert!(text.contains("  [B] Suez Crisis\n"));
    }

    #[test]
    fn test_config_issue_lines() {
        plain();
        let issues = vec![
            ConfigIssue::error(
                ConfigIssueCode::EmptyModelId {
                    role: ModelRole::Planner,
                },
                "models.planner.model_id: model id cannot be empty",
            ),
            ConfigIssue::warning(
                ConfigIssueCode::EmptyProvider {
                    role: ModelRole::Subagent,
                },
                "models.subagent.provider is empty",
            ),
        ];
        assert_eq!(
            ConsoleFormatter::format_config_issues(&issues),
            "error: models.planner.model_id: model id cannot be empty\nwarning: models.subagent.provider is empty"
        );
    }

    #[test]
    fn test_summary_lists_failures() {
        plain();
        let a = Subtask::new("A", "Construction", "d");
        let b = Subtask::new("B", "Suez Crisis", "d");
        let output = RunResearchOutput {
            outcome: ResearchOutcome::new(
                Query::try_new("History of the Suez Canal").unwrap(),
                ResearchPlan::new("plan"),
                vec![
                    SubtaskResult::success(&a, "ok"),
                    SubtaskResult::failure(&b, "rate limited\nmore detail"),
                ],
                FinalReport::new("# Report"),
            ),
            saved: SavedReport {
                run_dir: PathBuf::from("reports/20240101_000000"),
                final_report: PathBuf::from("reports/20240101_000000/final_report.md"),
                subagent_reports: Vec::new(),
            },
        };

        let text = ConsoleFormatter::format_summary(&output, Path::new("research_result.md"));
        assert!(text.contains("Subtasks: 1 succeeded, 1 failed"));
        assert!(text.contains("  x B: Error: rate limited\n"));
        assert!(!text.contains("more detail"));
        assert!(text.contains("Result file: research_result.md"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
