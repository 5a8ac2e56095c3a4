//! Progress notification port
//!
//! Defines the interface for reporting progress during a research run.

use research_domain::{Phase, ResearchPlan, Subtask, SubtaskResult};
use std::time::Duration;

/// Callback for progress updates during a research run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain log lines, nothing).
/// Callbacks may be invoked from the dispatcher task while workers run, so
/// implementations must be cheap and non-blocking.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);

    /// Called once per subtask when its worker finishes (success or failure)
    fn on_subtask_complete(&self, _result: &SubtaskResult) {}

    /// Called with the generated plan
    fn on_plan_ready(&self, _plan: &ResearchPlan) {}

    /// Called with the validated subtask list
    fn on_subtasks_ready(&self, _subtasks: &[Subtask]) {}

    /// Called before sleeping ahead of another attempt
    fn on_retry(&self, _attempt: u32, _max_retries: u32, _delay: Duration, _error: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
