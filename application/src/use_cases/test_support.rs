//! Scripted fakes shared by the use case tests.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use research_domain::tool::entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
use research_domain::tool::value_objects::{ToolError, ToolResult};
use research_domain::{ContentBlock, LlmResponse, Role, StopReason};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A scripted response for the fake gateway
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Text(String),
    Response(LlmResponse),
    Error(GatewayError),
}

impl ScriptedResponse {
    pub fn text(text: impl Into<String>) -> Self {
        ScriptedResponse::Text(text.into())
    }

    fn into_result(self) -> Result<LlmResponse, GatewayError> {
        match self {
            ScriptedResponse::Text(t) => Ok(LlmResponse::from_text(t)),
            ScriptedResponse::Response(r) => Ok(r),
            ScriptedResponse::Error(e) => Err(e),
        }
    }
}

/// A response asking for a single tool call.
pub fn tool_use(id: &str, name: &str, args: &[(&str, &str)]) -> ScriptedResponse {
    let input: HashMap<String, serde_json::Value> = args
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::json!(v)))
        .collect();
    ScriptedResponse::Response(LlmResponse {
        content: vec![ContentBlock::ToolUse {
            id: id.to_string(),
            name: name.to_string(),
            input,
        }],
        stop_reason: Some(StopReason::ToolUse),
        model: None,
    })
}

/// Fake gateway answering from per-model queues, recording every request.
#[derive(Default)]
pub struct ScriptedGateway {
    queues: Mutex<HashMap<String, VecDeque<ScriptedResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue responses for requests routed to `model_id`.
    pub fn script(self, model_id: &str, responses: Vec<ScriptedResponse>) -> Self {
        self.queues
            .lock()
            .unwrap()
            .entry(model_id.to_string())
            .or_default()
            .extend(responses);
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, model_id: &str) -> Vec<CompletionRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.model.model_id == model_id)
            .collect()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<LlmResponse, GatewayError> {
        let model_id = request.model.model_id.clone();
        self.requests.lock().unwrap().push(request);
        self.queues
            .lock()
            .unwrap()
            .get_mut(&model_id)
            .and_then(|q| q.pop_front())
            .unwrap_or_else(|| {
                ScriptedResponse::Error(GatewayError::Other(format!(
                    "no scripted response for {}",
                    model_id
                )))
            })
            .into_result()
    }
}

/// Fake gateway whose answer is computed from the request.
pub struct FnGateway<F>(pub F);

#[async_trait]
impl<F> LlmGateway for FnGateway<F>
where
    F: Fn(&CompletionRequest) -> Result<LlmResponse, GatewayError> + Send + Sync,
{
    async fn complete(&self, request: CompletionRequest) -> Result<LlmResponse, GatewayError> {
        (self.0)(&request)
    }
}

/// Last user message of a request.
pub fn user_prompt(request: &CompletionRequest) -> &str {
    request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .unwrap_or("")
}

/// Tool executor with `search_web` and `scrape_url` that records calls.
pub struct RecordingTools {
    spec: ToolSpec,
    calls: Mutex<Vec<ToolCall>>,
}

impl RecordingTools {
    pub fn new() -> Self {
        let spec = ToolSpec::new()
            .register(
                ToolDefinition::new("search_web", "Search the web")
                    .with_parameter(ToolParameter::new("query", "Search query", true)),
            )
            .register(
                ToolDefinition::new("scrape_url", "Scrape a page")
                    .with_parameter(ToolParameter::new("url", "Page URL", true)),
            );
        Self {
            spec,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolExecutorPort for RecordingTools {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.calls.lock().unwrap().push(call.clone());
        match call.tool_name.as_str() {
            "search_web" => match call.require_string("query") {
                Ok(query) => ToolResult::success(
                    "search_web",
                    format!("## Result for {}\nURL: https://example.com\n", query),
                ),
                Err(e) => ToolResult::failure("search_web", ToolError::invalid_argument(e)),
            },
            "scrape_url" => ToolResult::success("scrape_url", "# Page\n\ncontent"),
            other => ToolResult::failure(other, ToolError::not_found(other)),
        }
    }
}
