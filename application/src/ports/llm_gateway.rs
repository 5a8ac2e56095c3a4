//! LLM Gateway port
//!
//! Defines the interface for requesting completions from a text-generation
//! backend. Every request is self-contained: the caller sends the whole
//! conversation, the model to route to and the optional output constraints.

use async_trait::async_trait;
use research_domain::{LlmResponse, Message, ModelSpec, ResponseSchema};
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether the failure is temporary and the same request may succeed later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::RateLimited(_)
                | GatewayError::ServerError { .. }
                | GatewayError::Timeout
                | GatewayError::ConnectionError(_)
        )
    }
}

/// A single completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model (and inference provider) to route to
    pub model: ModelSpec,
    /// Full conversation so far
    pub messages: Vec<Message>,
    /// Constrain the output to this JSON schema
    pub response_schema: Option<ResponseSchema>,
    /// Tools the model may call (OpenAI `tools` entries)
    pub tools: Vec<serde_json::Value>,
    /// Upper bound on generated tokens
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(model: ModelSpec, messages: Vec<Message>) -> Self {
        Self {
            model,
            messages,
            response_schema: None,
            tools: Vec::new(),
            max_tokens: None,
        }
    }

    pub fn with_response_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_tools(mut self, tools: Vec<serde_json::Value>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Gateway for text generation
///
/// This port defines how the application layer talks to generation backends.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Request one completion for the given conversation.
    async fn complete(&self, request: CompletionRequest) -> Result<LlmResponse, GatewayError>;
}
