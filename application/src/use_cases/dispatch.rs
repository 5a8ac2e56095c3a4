//! Worker pool dispatcher
//!
//! Runs one isolated research agent per subtask, all at once, and collects
//! exactly one [`SubtaskResult`] per subtask. A worker failure (error or
//! panic) never escapes: it becomes a failed result carrying the error text.

use crate::config::AgentParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::research_agent::ResearchAgent;
use futures::FutureExt;
use research_domain::{
    ModelSpec, Phase, PromptTemplate, Query, ResearchPlan, Subtask, SubtaskResult, sort_results,
};
use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// What a single worker is allowed to see.
///
/// Workers get the query, the plan and their own subtask, never the
/// sibling subtasks or their results.
#[derive(Debug, Clone)]
pub struct WorkerContext {
    pub query: Arc<Query>,
    pub plan: Arc<ResearchPlan>,
    pub subtask: Subtask,
}

impl WorkerContext {
    pub fn prompt(&self) -> String {
        PromptTemplate::subagent_prompt(
            self.query.content(),
            self.plan.content(),
            &self.subtask,
        )
    }
}

/// Fans subtasks out to concurrent workers and joins them.
pub struct ResearchDispatcher<G: LlmGateway + ?Sized + 'static, T: ToolExecutorPort + ?Sized + 'static>
{
    gateway: Arc<G>,
    tools: Arc<T>,
    model: ModelSpec,
    params: AgentParams,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized + 'static, T: ToolExecutorPort + ?Sized + 'static>
    ResearchDispatcher<G, T>
{
    pub fn new(gateway: Arc<G>, tools: Arc<T>, model: ModelSpec, params: AgentParams) -> Self {
        Self {
            gateway,
            tools,
            model,
            params,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Research every subtask concurrently.
    ///
    /// Returns one result per subtask, sorted ascending by id.
    pub async fn run_all(
        &self,
        subtasks: &[Subtask],
        query: Arc<Query>,
        plan: Arc<ResearchPlan>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<SubtaskResult> {
        info!("Running {} subagents concurrently", subtasks.len());
        progress.on_phase_start(&Phase::Research, subtasks.len());

        let mut join_set = JoinSet::new();

        for subtask in subtasks {
            let context = WorkerContext {
                query: Arc::clone(&query),
                plan: Arc::clone(&plan),
                subtask: subtask.clone(),
            };
            let agent = ResearchAgent::new(
                format!("subagent_{}", subtask.id),
                Arc::clone(&self.gateway),
                Arc::clone(&self.tools),
                self.model.clone(),
                self.params.clone(),
            )
            .with_conversation_logger(Arc::clone(&self.logger));

            join_set.spawn(async move {
                info!(subtask_id = %context.subtask.id, "Subagent starting");
                let prompt = context.prompt();
                let outcome = AssertUnwindSafe(agent.run(&prompt)).catch_unwind().await;

                match outcome {
                    Ok(Ok(report)) => SubtaskResult::success(&context.subtask, report),
                    Ok(Err(e)) => {
                        warn!(subtask_id = %context.subtask.id, "Subagent failed: {}", e);
                        SubtaskResult::failure(&context.subtask, e)
                    }
                    Err(panic) => {
                        let message = panic_message(panic.as_ref());
                        warn!(subtask_id = %context.subtask.id, "Subagent panicked: {}", message);
                        SubtaskResult::failure(&context.subtask, message)
                    }
                }
            });
        }

        let mut results = Vec::with_capacity(subtasks.len());

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(result) => {
                    info!(
                        subtask_id = %result.id,
                        success = result.is_success(),
                        "Subagent completed"
                    );
                    self.record_completion(&result, progress);
                    results.push(result);
                }
                Err(e) => {
                    warn!("Subagent task join error: {}", e);
                }
            }
        }

        // Tasks lost to a join error are reported as failures.
        let finished: HashSet<String> = results.iter().map(|r| r.id.clone()).collect();
        for subtask in subtasks.iter().filter(|s| !finished.contains(&s.id)) {
            let result = SubtaskResult::failure(subtask, "subagent task was aborted");
            self.record_completion(&result, progress);
            results.push(result);
        }

        sort_results(&mut results);
        progress.on_phase_complete(&Phase::Research);
        results
    }

    fn record_completion(&self, result: &SubtaskResult, progress: &dyn ProgressNotifier) {
        progress.on_subtask_complete(result);
        self.logger.log(ConversationEvent::new(
            event_types::SUBTASK_COMPLETED,
            serde_json::json!({
                "id": result.id,
                "title": result.title,
                "success": result.is_success(),
                "result": result.result,
            }),
        ));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("subagent panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("subagent panicked: {}", s)
    } else {
        "subagent panicked".to_string()
    }
}
