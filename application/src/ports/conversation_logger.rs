//! Port for the research transcript.
//!
//! [`ConversationLogger`] records what was exchanged during a run (prompts,
//! responses, tool calls, retries) as machine-readable events. It is
//! separate from `tracing`: tracing carries diagnostics for humans, the
//! transcript carries the full content for later inspection.

use serde_json::Value;

/// Event type names written to the transcript.
pub mod event_types {
    pub const PLAN_GENERATED: &str = "plan_generated";
    pub const SUBTASKS_GENERATED: &str = "subtasks_generated";
    pub const LLM_REQUEST: &str = "llm_request";
    pub const LLM_RESPONSE: &str = "llm_response";
    pub const TOOL_CALL: &str = "tool_call";
    pub const TOOL_RESULT: &str = "tool_result";
    pub const SUBTASK_COMPLETED: &str = "subtask_completed";
    pub const RETRY_SCHEDULED: &str = "retry_scheduled";
    pub const SYNTHESIS_COMPLETED: &str = "synthesis_completed";
}

/// A structured transcript event.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    /// Event type identifier, one of [`event_types`].
    pub event_type: &'static str,
    /// Event-specific fields.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording transcript events.
///
/// `log` is synchronous and infallible: a broken transcript must not abort
/// a research run, so adapters swallow their own write errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
