//! Progress reporting for research runs

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use research_application::ProgressNotifier;
use research_domain::{Phase, ResearchPlan, Subtask, SubtaskResult};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with indicatif bars (one bar per phase)
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
    show_details: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
            show_details: false,
        }
    }

    /// Also print the plan and subtask list as they become available.
    pub fn with_details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn phase_label(phase: &Phase) -> String {
        format!("Phase {}: {}", phase.ordinal(), phase.display_name())
    }

    fn println(&self, text: &str) {
        let _ = self.multi.println(text);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = if *phase == Phase::Research {
            let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
            pb.set_style(Self::phase_style());
            pb
        } else {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        };
        pb.set_prefix(Self::phase_label(phase));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        let Ok(mut slot) = self.phase_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            pb.finish_with_message(format!("{} complete!", phase.display_name().green()));
        }
    }

    fn on_subtask_complete(&self, result: &SubtaskResult) {
        let Ok(slot) = self.phase_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.as_ref() {
            let status = if result.is_success() {
                format!("{} {}: {}", "v".green(), result.id, result.title)
            } else {
                format!("{} {}: {}", "x".red(), result.id, result.title)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_plan_ready(&self, plan: &ResearchPlan) {
        if self.show_details {
            self.println(&ConsoleFormatter::format_plan(plan));
        }
    }

    fn on_subtasks_ready(&self, subtasks: &[Subtask]) {
        if self.show_details {
            self.println(&ConsoleFormatter::format_subtasks(subtasks));
        }
    }

    fn on_retry(&self, attempt: u32, max_retries: u32, delay: Duration, error: &str) {
        self.println(&ConsoleFormatter::format_retry(
            attempt,
            max_retries,
            delay,
            error,
        ));
    }
}

/// Plain line-based progress for non-interactive terminals
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        if *phase == Phase::Research {
            println!(
                "{} {} ({} subtasks)",
                "->".cyan(),
                ProgressReporter::phase_label(phase).bold(),
                total_tasks
            );
        } else {
            println!("{} {}", "->".cyan(), ProgressReporter::phase_label(phase).bold());
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {}

    fn on_subtask_complete(&self, result: &SubtaskResult) {
        if result.is_success() {
            println!("  {} {}: {}", "v".green(), result.id, result.title);
        } else {
            println!("  {} {}: {} (failed)", "x".red(), result.id, result.title);
        }
    }

    fn on_subtasks_ready(&self, subtasks: &[Subtask]) {
        println!("{}", ConsoleFormatter::format_subtasks(subtasks));
    }

    fn on_retry(&self, attempt: u32, max_retries: u32, delay: Duration, error: &str) {
        println!(
            "{}",
            ConsoleFormatter::format_retry(attempt, max_retries, delay, error)
        );
    }
}
