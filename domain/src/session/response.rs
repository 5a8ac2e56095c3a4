//! Generation response types.
//!
//! A backend answer is a list of content blocks mixing text and tool use
//! requests. Research agents keep calling the backend while the response
//! carries tool calls, and take the text of the first tool-free response as
//! their answer.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of content within a generation response.
///
/// # Examples
///
/// ```
/// use research_domain::session::response::ContentBlock;
///
/// let text = ContentBlock::Text("Let me search for that.".to_string());
/// assert!(text.as_text().is_some());
///
/// let tool = ContentBlock::ToolUse {
///     id: "call_abc123".to_string(),
///     name: "search_web".to_string(),
///     input: [("query".to_string(), serde_json::json!("suez canal opening"))]
///         .into_iter().collect(),
/// };
/// assert!(tool.as_tool_use().is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text content block from the model.
    Text(String),

    /// A tool use request from the model.
    ToolUse {
        /// Backend-assigned id used to correlate the tool result.
        id: String,
        /// Tool name as requested by the model.
        name: String,
        /// Structured arguments.
        input: HashMap<String, serde_json::Value>,
    },
}

impl ContentBlock {
    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `(id, name, input)` if this is a `ToolUse` block.
    pub fn as_tool_use(&self) -> Option<(&str, &str, &HashMap<String, serde_json::Value>)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// The model wants tool results before continuing.
    ToolUse,
    /// Hit the token limit; the response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

impl StopReason {
    /// Map an OpenAI-style `finish_reason` string.
    pub fn from_finish_reason(reason: &str) -> Self {
        match reason {
            "stop" | "eos" | "end_turn" => StopReason::EndTurn,
            "tool_calls" | "function_call" | "tool_use" => StopReason::ToolUse,
            "length" | "max_tokens" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        }
    }
}

/// A structured response from the generation backend.
///
/// # Examples
///
/// ```
/// use research_domain::session::response::{LlmResponse, ContentBlock, StopReason};
///
/// let response = LlmResponse::from_text("The canal opened in 1869.");
/// assert_eq!(response.text_content(), "The canal opened in 1869.");
/// assert!(!response.has_tool_calls());
///
/// let response = LlmResponse {
///     content: vec![
///         ContentBlock::Text("Searching...".to_string()),
///         ContentBlock::ToolUse {
///             id: "call_1".to_string(),
///             name: "scrape_url".to_string(),
///             input: [("url".to_string(), serde_json::json!("https://example.com"))]
///                 .into_iter().collect(),
///         },
///     ],
///     stop_reason: Some(StopReason::ToolUse),
///     model: None,
/// };
/// assert!(response.has_tool_calls());
/// assert_eq!(response.tool_calls().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Content blocks in the response (text and/or tool use).
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the backend).
    pub model: Option<String>,
}

impl LlmResponse {
    /// Create a text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all `ToolUse` content blocks as `Vec<ToolCall>`, keeping the
    /// backend-assigned id in `native_id`.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::from_native(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if the response contains any tool use requests.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_creates_text_only_response() {
        let response = LlmResponse::from_text("Hello, world!");
        assert_eq!(response.text_content(), "Hello, world!");
        assert!(!response.has_tool_calls());
        assert!(response.tool_calls().is_empty());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
    }

    #[test]
    fn tool_calls_extraction_keeps_native_ids() {
        let response = LlmResponse {
            content: vec![
                ContentBlock::Text("Looking it up.".to_string()),
                ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: "search_web".to_string(),
                    input: [("query".to_string(), serde_json::json!("suez 1956"))]
                        .into_iter()
                        .collect(),
                },
                ContentBlock::ToolUse {
                    id: "call_2".to_string(),
                    name: "scrape_url".to_string(),
                    input: [("url".to_string(), serde_json::json!("https://example.com"))]
                        .into_iter()
                        .collect(),
                },
            ],
            stop_reason: Some(StopReason::ToolUse),
            model: Some("test-model".to_string()),
        };

        let calls = response.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].tool_name, "search_web");
        assert_eq!(calls[0].native_id.as_deref(), Some("call_1"));
        assert_eq!(calls[0].get_string("query"), Some("suez 1956"));
        assert_eq!(calls[1].native_id.as_deref(), Some("call_2"));
        assert_eq!(response.text_content(), "Looking it up.");
    }

    #[test]
    fn empty_response() {
        let response = LlmResponse {
            content: vec![],
            stop_reason: None,
            model: None,
        };
        assert_eq!(response.text_content(), "");
        assert!(!response.has_tool_calls());
    }

    #[test]
    fn finish_reason_mapping() {
        assert_eq!(StopReason::from_finish_reason("stop"), StopReason::EndTurn);
        assert_eq!(StopReason::from_finish_reason("tool_calls"), StopReason::ToolUse);
        assert_eq!(StopReason::from_finish_reason("length"), StopReason::MaxTokens);
        assert_eq!(
            StopReason::from_finish_reason("content_filter"),
            StopReason::Other("content_filter".to_string())
        );
    }
}
