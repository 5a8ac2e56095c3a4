//! Run Research use case
//!
//! Orchestrates the full pipeline:
//!
//! ```text
//! Query ─▶ Plan ─▶ Subtasks ─▶ (worker per subtask) ─▶ Results ─▶ Report ─▶ Store
//! ```
//!
//! Every stage error except a worker failure ends the run.

use crate::config::ResearchConfig;
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::report_store::{ReportStore, ReportStoreError, SavedReport};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::dispatch::ResearchDispatcher;
use crate::use_cases::generate_plan::{GeneratePlanError, GeneratePlanUseCase};
use crate::use_cases::split_tasks::{SplitTasksError, SplitTasksUseCase};
use crate::use_cases::synthesize::{SynthesisInput, SynthesizeError, SynthesizeUseCase};
use research_domain::{Phase, Query, ResearchOutcome};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that end a research run
#[derive(Error, Debug)]
pub enum RunResearchError {
    #[error(transparent)]
    Plan(#[from] GeneratePlanError),

    #[error(transparent)]
    Split(#[from] SplitTasksError),

    #[error(transparent)]
    Synthesize(#[from] SynthesizeError),

    #[error("Failed to save reports: {0}")]
    Store(#[from] ReportStoreError),
}

impl RunResearchError {
    /// Pipeline phase the run stopped in.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            RunResearchError::Plan(_) => Some(Phase::Planning),
            RunResearchError::Split(_) => Some(Phase::Decomposition),
            RunResearchError::Synthesize(_) => Some(Phase::Synthesis),
            RunResearchError::Store(_) => None,
        }
    }
}

/// Output of a completed run
#[derive(Debug, Clone)]
pub struct RunResearchOutput {
    pub outcome: ResearchOutcome,
    pub saved: SavedReport,
}

/// Use case for running a complete deep-research pipeline
pub struct RunResearchUseCase<G, T, S>
where
    G: LlmGateway + ?Sized + 'static,
    T: ToolExecutorPort + ?Sized + 'static,
    S: ReportStore + ?Sized,
{
    gateway: Arc<G>,
    tools: Arc<T>,
    store: Arc<S>,
    config: ResearchConfig,
    logger: Arc<dyn ConversationLogger>,
}

impl<G, T, S> RunResearchUseCase<G, T, S>
where
    G: LlmGateway + ?Sized + 'static,
    T: ToolExecutorPort + ?Sized + 'static,
    S: ReportStore + ?Sized,
{
    pub fn new(gateway: Arc<G>, tools: Arc<T>, store: Arc<S>, config: ResearchConfig) -> Self {
        Self {
            gateway,
            tools,
            store,
            config,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, query: Query) -> Result<RunResearchOutput, RunResearchError> {
        self.execute_with_progress(query, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        query: Query,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunResearchOutput, RunResearchError> {
        let models = &self.config.models;
        info!("Running the deep research");

        // Phase 1: Plan
        progress.on_phase_start(&Phase::Planning, 1);
        let plan = GeneratePlanUseCase::new(Arc::clone(&self.gateway))
            .with_conversation_logger(Arc::clone(&self.logger))
            .execute(&query, &models.planner)
            .await?;
        progress.on_plan_ready(&plan);
        progress.on_phase_complete(&Phase::Planning);

        // Phase 2: Decompose
        progress.on_phase_start(&Phase::Decomposition, 1);
        let subtasks = SplitTasksUseCase::new(Arc::clone(&self.gateway))
            .with_conversation_logger(Arc::clone(&self.logger))
            .execute(&plan, &models.splitter)
            .await?;
        progress.on_subtasks_ready(&subtasks);
        progress.on_phase_complete(&Phase::Decomposition);

        // Phase 3: Research (never fails as a whole)
        let query = Arc::new(query);
        let plan = Arc::new(plan);
        let results = ResearchDispatcher::new(
            Arc::clone(&self.gateway),
            Arc::clone(&self.tools),
            models.subagent.clone(),
            self.config.agent.clone(),
        )
        .with_conversation_logger(Arc::clone(&self.logger))
        .run_all(&subtasks, Arc::clone(&query), Arc::clone(&plan), progress)
        .await;

        // Phase 4: Synthesize
        progress.on_phase_start(&Phase::Synthesis, 1);
        let report = SynthesizeUseCase::new(Arc::clone(&self.gateway), Arc::clone(&self.tools))
            .with_conversation_logger(Arc::clone(&self.logger))
            .execute(
                SynthesisInput {
                    query: &query,
                    plan: &plan,
                    results: &results,
                },
                &models.coordinator,
                &self.config.agent,
                &self.config.synthesis_retry,
                progress,
            )
            .await?;
        progress.on_phase_complete(&Phase::Synthesis);

        let outcome = ResearchOutcome::new(
            Arc::unwrap_or_clone(query),
            Arc::unwrap_or_clone(plan),
            results,
            report,
        );

        let saved = self.store.save(&outcome).await?;
        info!("Reports saved to {}", saved.run_dir.display());

        Ok(RunResearchOutput { outcome, saved })
    }
}
