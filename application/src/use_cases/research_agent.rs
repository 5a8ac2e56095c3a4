//! Tool-using research agent.
//!
//! One agent run is a loop over model calls. While the model asks for
//! tools, the calls are executed and their results appended to the
//! conversation; the first response without tool calls is the answer.
//! Workers and the chief editor both run this loop, each with its own
//! model and a fresh conversation.

use crate::config::AgentParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::retry::TransientError;
use futures::future::join_all;
use research_domain::tool::value_objects::{ToolError, ToolResult};
use research_domain::{Message, ModelSpec, PromptTemplate, ToolCall};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone)]
pub enum AgentError {
    #[error("Generation failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Agent did not finish within {max_steps} steps")]
    MaxStepsExceeded { max_steps: usize },

    #[error("Model returned an empty answer")]
    EmptyAnswer,
}

impl TransientError for AgentError {
    fn is_transient(&self) -> bool {
        match self {
            AgentError::Gateway(e) => e.is_transient(),
            AgentError::EmptyAnswer => true,
            AgentError::MaxStepsExceeded { .. } => false,
        }
    }
}

/// An isolated research agent bound to one model.
pub struct ResearchAgent<G: LlmGateway + ?Sized, T: ToolExecutorPort + ?Sized> {
    name: String,
    gateway: Arc<G>,
    tools: Arc<T>,
    model: ModelSpec,
    params: AgentParams,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized, T: ToolExecutorPort + ?Sized> ResearchAgent<G, T> {
    pub fn new(
        name: impl Into<String>,
        gateway: Arc<G>,
        tools: Arc<T>,
        model: ModelSpec,
        params: AgentParams,
    ) -> Self {
        Self {
            name: name.into(),
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

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the tool loop on `prompt` and return the final answer text.
    pub async fn run(&self, prompt: &str) -> Result<String, AgentError> {
        let mut messages = vec![
            Message::system(PromptTemplate::agent_system()),
            Message::user(prompt),
        ];
        let tools = self.tools.tool_spec().to_api_tools();

        for step in 1..=self.params.max_steps {
            debug!(agent = %self.name, step, "Requesting completion");
            let first_prompt = (step == 1).then_some(prompt);
            self.logger.log(ConversationEvent::new(
                event_types::LLM_REQUEST,
                serde_json::json!({
                    "agent": self.name,
                    "model": self.model.routed_name(),
                    "step": step,
                    "messages": messages.len(),
                    "prompt": first_prompt,
                }),
            ));

            let request = CompletionRequest::new(self.model.clone(), messages.clone())
                .with_tools(tools.clone())
                .with_max_tokens(self.params.max_tokens);
            let response = self.gateway.complete(request).await?;

            let text = response.text_content();
            let calls = response.tool_calls();
            self.logger.log(ConversationEvent::new(
                event_types::LLM_RESPONSE,
                serde_json::json!({
                    "agent": self.name,
                    "step": step,
                    "text": text,
                    "tool_calls": calls.len(),
                }),
            ));

            if calls.is_empty() {
                let answer = text.trim();
                if answer.is_empty() {
                    return Err(AgentError::EmptyAnswer);
                }
                info!(agent = %self.name, steps = step, "Agent finished");
                return Ok(answer.to_string());
            }

            let calls: Vec<ToolCall> = calls
                .into_iter()
                .enumerate()
                .map(|(i, call)| match call.native_id {
                    Some(_) => call,
                    None => call.with_native_id(format!("call_{}_{}", step, i)),
                })
                .collect();

            let results = join_all(calls.iter().map(|call| self.execute_tool(call))).await;

            messages.push(Message::assistant_with_tool_calls(text, calls.clone()));
            for (call, result) in calls.iter().zip(results) {
                let id = call.native_id.clone().unwrap_or_default();
                messages.push(Message::tool_result(id, result.to_message_content()));
            }
        }

        Err(AgentError::MaxStepsExceeded {
            max_steps: self.params.max_steps,
        })
    }

    async fn execute_tool(&self, call: &ToolCall) -> ToolResult {
        debug!(agent = %self.name, tool = %call.tool_name, "Executing tool");
        self.logger.log(ConversationEvent::new(
            event_types::TOOL_CALL,
            serde_json::json!({
                "agent": self.name,
                "tool": call.tool_name,
                "arguments": call.arguments,
            }),
        ));

        let started = Instant::now();
        let result = if self.tools.has_tool(&call.tool_name) {
            self.tools.execute(call).await
        } else {
            ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name))
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        self.logger.log(ConversationEvent::new(
            event_types::TOOL_RESULT,
            serde_json::json!({
                "agent": self.name,
                "tool": call.tool_name,
                "success": result.is_success(),
                "duration_ms": duration_ms,
                "bytes": result.output().map(str::len),
            }),
        ));
        result
    }
}
