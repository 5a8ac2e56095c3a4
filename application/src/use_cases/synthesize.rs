//! Synthesize use case
//!
//! The chief editor merges every subtask result (failures included) into
//! the final report. The agent run is wrapped in the retry executor; when
//! the attempt budget is spent the run fails, there is no degraded report.

use crate::config::AgentParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::research_agent::{AgentError, ResearchAgent};
use crate::use_cases::retry::{InvalidRetryPolicy, RetryError, RetryPolicy, invoke_with_retry};
use research_domain::{
    FinalReport, ModelSpec, Phase, PromptTemplate, Query, ResearchPlan, SubtaskResult,
    combine_reports,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SynthesizeError {
    #[error(transparent)]
    InvalidConfig(#[from] InvalidRetryPolicy),

    #[error("Synthesis failed: {0}")]
    Failed(#[source] AgentError),

    #[error("Synthesis failed after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        #[source]
        source: AgentError,
    },
}

impl From<RetryError<AgentError>> for SynthesizeError {
    fn from(err: RetryError<AgentError>) -> Self {
        match err {
            RetryError::InvalidConfig(e) => SynthesizeError::InvalidConfig(e),
            RetryError::Fatal(e) => SynthesizeError::Failed(e),
            RetryError::Exhausted { attempts, source } => {
                SynthesizeError::Exhausted { attempts, source }
            }
        }
    }
}

/// Everything the chief editor works from
pub struct SynthesisInput<'a> {
    pub query: &'a Query,
    pub plan: &'a ResearchPlan,
    /// Sorted subtask results, successes and failures
    pub results: &'a [SubtaskResult],
}

pub struct SynthesizeUseCase<G: LlmGateway + ?Sized, T: ToolExecutorPort + ?Sized> {
    gateway: Arc<G>,
    tools: Arc<T>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized, T: ToolExecutorPort + ?Sized> SynthesizeUseCase<G, T> {
    pub fn new(gateway: Arc<G>, tools: Arc<T>) -> Self {
        Self {
            gateway,
            tools,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub async fn execute(
        &self,
        input: SynthesisInput<'_>,
        model: &ModelSpec,
        params: &AgentParams,
        policy: &RetryPolicy,
        progress: &dyn ProgressNotifier,
    ) -> Result<FinalReport, SynthesizeError> {
        info!("Synthesizing {} results with {}", input.results.len(), model);

        let combined = combine_reports(input.results);
        let prompt =
            PromptTemplate::synthesis_prompt(input.query.content(), input.plan.content(), &combined);

        let chief_editor = ResearchAgent::new(
            "chief_editor",
            Arc::clone(&self.gateway),
            Arc::clone(&self.tools),
            model.clone(),
            params.clone(),
        )
        .with_conversation_logger(Arc::clone(&self.logger));

        let observer = RetryTranscript {
            progress,
            logger: self.logger.as_ref(),
        };

        let editor = &chief_editor;
        let prompt = prompt.as_str();
        let content = invoke_with_retry(policy, move |_| editor.run(prompt), &observer).await?;
        let report = FinalReport::new(content);

        self.logger.log(ConversationEvent::new(
            event_types::SYNTHESIS_COMPLETED,
            serde_json::json!({
                "model": model.routed_name(),
                "report_bytes": report.content().len(),
            }),
        ));

        Ok(report)
    }
}

/// Forwards retry notifications to the progress display and the transcript.
struct RetryTranscript<'a> {
    progress: &'a dyn ProgressNotifier,
    logger: &'a dyn ConversationLogger,
}

impl ProgressNotifier for RetryTranscript<'_> {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        self.progress.on_phase_start(phase, total_tasks);
    }

    fn on_phase_complete(&self, phase: &Phase) {
        self.progress.on_phase_complete(phase);
    }

    fn on_retry(&self, attempt: u32, max_retries: u32, delay: Duration, error: &str) {
        self.logger.log(ConversationEvent::new(
            event_types::RETRY_SCHEDULED,
            serde_json::json!({
                "stage": "synthesis",
                "attempt": attempt,
                "max_retries": max_retries,
                "delay_ms": delay.as_millis() as u64,
                "error": error,
            }),
        ));
        self.progress.on_retry(attempt, max_retries, delay, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::test_support::{RecordingTools, ScriptedGateway, ScriptedResponse};
    use research_domain::Subtask;
    use std::error::Error as _;
    use tokio::time::Instant;

    fn results() -> Vec<SubtaskResult> {
        vec![
            SubtaskResult::success(&Subtask::new("A", "Construction", "d"), "Built 1859-1869."),
            SubtaskResult::failure(&Subtask::new("B", "Suez Crisis", "d"), "rate limited"),
        ]
    }

    fn editor() -> ModelSpec {
        ModelSpec::new("editor", "auto")
    }

    async fn run(
        gateway: Arc<ScriptedGateway>,
        policy: RetryPolicy,
    ) -> Result<FinalReport, SynthesizeError> {
        let use_case = SynthesizeUseCase::new(gateway, Arc::new(RecordingTools::new()));
        let query = Query::try_new("History of the Suez Canal").unwrap();
        let plan = ResearchPlan::new("the plan");
        let results = results();
        use_case
            .execute(
                SynthesisInput {
                    query: &query,
                    plan: &plan,
                    results: &results,
                },
                &editor(),
                &AgentParams::default(),
                &policy,
                &NoProgress,
            )
            .await
    }

    #[tokio::test]
    async fn test_prompt_embeds_every_result() {
        let gateway = Arc::new(
            ScriptedGateway::new().script("editor", vec![ScriptedResponse::text("# Final")]),
        );

        let report = run(gateway.clone(), RetryPolicy::default()).await.unwrap();
        assert_eq!(report.content(), "# Final");

        let requests = gateway.requests_for("editor");
        assert_eq!(requests.len(), 1);
        let prompt = &requests[0].messages[1].content;
        assert!(prompt.contains("## Subtask: Construction (ID: A)\n\nBuilt 1859-1869."));
        assert!(prompt.contains("\n\n---\n\n## Subtask: Suez Crisis (ID: B)\n\nError: rate limited"));
        assert!(prompt.contains("the plan"));
        assert_eq!(requests[0].tools.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_retried() {
        let gateway = Arc::new(ScriptedGateway::new().script(
            "editor",
            vec![
                ScriptedResponse::Error(GatewayError::RateLimited("busy".into())),
                ScriptedResponse::Error(GatewayError::Timeout),
                ScriptedResponse::text("# Final"),
            ],
        ));
        let start = Instant::now();

        let report = run(gateway.clone(), RetryPolicy::default()).await.unwrap();

        assert_eq!(report.content(), "# Final");
        assert_eq!(gateway.requests_for("editor").len(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_is_fatal() {
        let gateway = Arc::new(ScriptedGateway::new().script(
            "editor",
            vec![
                ScriptedResponse::Error(GatewayError::Timeout),
                ScriptedResponse::Error(GatewayError::Timeout),
                ScriptedResponse::Error(GatewayError::ConnectionError("reset".into())),
            ],
        ));

        let err = run(gateway, RetryPolicy::default()).await.unwrap_err();

        assert!(matches!(err, SynthesizeError::Exhausted { attempts: 3, .. }));
        assert!(err.source().unwrap().to_string().contains("reset"));
    }

    #[tokio::test]
    async fn test_hard_failure_is_not_retried() {
        let gateway = Arc::new(ScriptedGateway::new().script(
            "editor",
            vec![ScriptedResponse::Error(GatewayError::Authentication(
                "bad token".into(),
            ))],
        ));

        let err = run(gateway.clone(), RetryPolicy::default()).await.unwrap_err();

        assert!(matches!(
            err,
            SynthesizeError::Failed(AgentError::Gateway(GatewayError::Authentication(_)))
        ));
        assert_eq!(gateway.requests_for("editor").len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_policy() {
        let gateway = Arc::new(ScriptedGateway::new());
        let policy = RetryPolicy {
            max_retries: 0,
            base_delay: Duration::from_secs(10),
        };

        let err = run(gateway.clone(), policy).await.unwrap_err();
        assert!(matches!(err, SynthesizeError::InvalidConfig(_)));
        assert!(gateway.requests().is_empty());
    }
}
