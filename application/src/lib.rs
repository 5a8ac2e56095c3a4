//! Application layer for deep-research
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AgentParams, ResearchConfig, RoleModels};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    report_store::{ReportStore, ReportStoreError, SavedReport},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::dispatch::{ResearchDispatcher, WorkerContext};
pub use use_cases::generate_plan::{GeneratePlanError, GeneratePlanUseCase};
pub use use_cases::research_agent::{AgentError, ResearchAgent};
pub use use_cases::retry::{
    InvalidRetryPolicy, RetryError, RetryPolicy, TransientError, invoke_with_retry,
};
pub use use_cases::run_research::{RunResearchError, RunResearchOutput, RunResearchUseCase};
pub use use_cases::split_tasks::{SplitTasksError, SplitTasksUseCase};
pub use use_cases::synthesize::{SynthesisInput, SynthesizeError, SynthesizeUseCase};
