//! Wire types for the OpenAI-compatible chat completions API
//!
//! Converts domain requests into the router's JSON body and its responses
//! back into `LlmResponse`.

use research_application::{CompletionRequest, GatewayError};
use research_domain::util::truncate_chars;
use research_domain::{ContentBlock, LlmResponse, Message, ResponseSchema, StopReason, ToolCall};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Longest error body kept in a `GatewayError`.
const MAX_ERROR_BODY_CHARS: usize = 500;

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub kind: String,
    pub function: WireFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    /// JSON object encoded as a string
    #[serde(default)]
    pub arguments: String,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub schema: serde_json::Value,
    pub strict: bool,
}

impl From<&ResponseSchema> for ResponseFormat {
    fn from(schema: &ResponseSchema) -> Self {
        Self {
            kind: "json_schema",
            json_schema: JsonSchemaFormat {
                name: schema.name.clone(),
                schema: schema.schema.clone(),
                strict: schema.strict,
            },
        }
    }
}

fn convert_tool_call(call: &ToolCall) -> WireToolCall {
    WireToolCall {
        id: call.native_id.clone().unwrap_or_default(),
        kind: function_type(),
        function: WireFunction {
            name: call.tool_name.clone(),
            arguments: call.arguments_json(),
        },
    }
}

/// Convert a domain message to its wire form.
pub fn convert_message(message: &Message) -> WireMessage {
    // Assistant turns that only call tools carry a null content
    let content = if message.content.is_empty() && !message.tool_calls.is_empty() {
        None
    } else {
        Some(message.content.clone())
    };

    WireMessage {
        role: message.role.as_str(),
        content,
        tool_calls: message.tool_calls.iter().map(convert_tool_call).collect(),
        tool_call_id: message.tool_call_id.clone(),
    }
}

/// Build the request body for a completion request.
pub fn build_chat_request(request: &CompletionRequest) -> ChatRequest {
    ChatRequest {
        model: request.model.routed_name(),
        messages: request.messages.iter().map(convert_message).collect(),
        tools: request.tools.clone(),
        response_format: request.response_schema.as_ref().map(ResponseFormat::from),
        max_tokens: request.max_tokens,
    }
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

/// Parse a tool call's argument string into a map.
///
/// Malformed arguments become an empty map; the tool then reports the
/// missing argument back to the model.
fn parse_arguments(name: &str, raw: &str) -> HashMap<String, serde_json::Value> {
    if raw.trim().is_empty() {
        return HashMap::new();
    }
    match serde_json::from_str::<HashMap<String, serde_json::Value>>(raw) {
        Ok(map) => map,
        Err(e) => {
            warn!(tool = name, "Ignoring malformed tool arguments: {}", e);
            HashMap::new()
        }
    }
}

/// Convert the first choice of a chat response to a domain `LlmResponse`.
pub fn convert_chat_response(response: ChatResponse) -> Result<LlmResponse, GatewayError> {
    let model = response.model;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::MalformedResponse("response has no choices".to_string()))?;

    let mut content = Vec::new();
    if let Some(text) = choice.message.content.filter(|t| !t.is_empty()) {
        content.push(ContentBlock::Text(text));
    }
    for (i, call) in choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .enumerate()
    {
        let id = if call.id.is_empty() {
            format!("call_{}", i)
        } else {
            call.id
        };
        let input = parse_arguments(&call.function.name, &call.function.arguments);
        content.push(ContentBlock::ToolUse {
            id,
            name: call.function.name,
            input,
        });
    }

    Ok(LlmResponse {
        content,
        stop_reason: choice
            .finish_reason
            .as_deref()
            .map(StopReason::from_finish_reason),
        model,
    })
}

// ─── Errors ──────────────────────────────────────────────────────

/// Pull a readable message out of an error body.
///
/// Handles `{"error": "..."}`, `{"error": {"message": "..."}}` and plain text.
pub fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|json| {
        let error = json.get("error")?;
        error
            .as_str()
            .or_else(|| error.get("message").and_then(|m| m.as_str()))
            .map(str::to_string)
    });

    match message {
        Some(m) => m,
        None => truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS).0.to_string(),
    }
}

/// Classify a non-success HTTP status.
pub fn classify_status(status: u16, body: &str) -> GatewayError {
    let message = error_message(body);
    match status {
        429 => GatewayError::RateLimited(message),
        401 | 403 => GatewayError::Authentication(message),
        500..=599 => GatewayError::ServerError { status, message },
        _ => GatewayError::InvalidRequest(format!("HTTP {}: {}", status, message)),
    }
}

/// Classify a transport-level failure.
pub fn classify_transport_error(error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else if error.is_decode() {
        GatewayError::MalformedResponse(error.to_string())
    } else {
        GatewayError::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_domain::ModelSpec;
    use serde_json::json;

    #[test]
    fn test_request_body_routes_provider_and_schema() {
        let request = CompletionRequest::new(
            ModelSpec::new("Qwen/Qwen3-32B", "cerebras"),
            vec![Message::system("sys"), Message::user("split this")],
        )
        .with_response_schema(ResponseSchema::strict("subtaskList", json!({"type": "object"})))
        .with_max_tokens(Some(512));

        let body = serde_json::to_value(build_chat_request(&request)).unwrap();

        assert_eq!(body["model"], "Qwen/Qwen3-32B:cerebras");
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "split this"}));
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "subtaskList");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
        assert_eq!(body["max_tokens"], 512);
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_auto_provider_has_no_suffix() {
        let request = CompletionRequest::new(ModelSpec::auto("Qwen/Qwen3-32B"), vec![]);
        assert_eq!(build_chat_request(&request).model, "Qwen/Qwen3-32B");
    }

    #[test]
    fn test_tool_turns_on_the_wire() {
        let call = ToolCall::new("search_web")
            .with_arg("query", "suez canal")
            .with_native_id("call_7");
        let assistant = convert_message(&Message::assistant_with_tool_calls("", vec![call]));
        let value = serde_json::to_value(&assistant).unwrap();
        assert_eq!(value["content"], serde_json::Value::Null);
        assert_eq!(value["tool_calls"][0]["id"], "call_7");
        assert_eq!(value["tool_calls"][0]["type"], "function");
        assert_eq!(
            value["tool_calls"][0]["function"]["arguments"],
            r#"{"query":"suez canal"}"#
        );

        let result = serde_json::to_value(convert_message(&Message::tool_result(
            "call_7",
            "No results found.",
        )))
        .unwrap();
        assert_eq!(result["role"], "tool");
        assert_eq!(result["tool_call_id"], "call_7");
    }

    #[test]
    fn test_convert_text_response() {
        let response: ChatResponse = serde_json::from_value(json!({
            "model": "Qwen/Qwen3-32B",
            "choices": [{
                "message": {"role": "assistant", "content": "The canal opened in 1869."},
                "finish_reason": "stop"
            }]
        }))
        .unwrap();

        let response = convert_chat_response(response).unwrap();
        assert_eq!(response.text_content(), "The canal opened in 1869.");
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(response.model.as_deref(), Some("Qwen/Qwen3-32B"));
    }

    #[test]
    fn test_convert_tool_call_response() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [
                        {"id": "abc", "type": "function",
                         "function": {"name": "scrape_url", "arguments": "{\"url\":\"https://example.com\"}"}},
                        {"function": {"name": "search_web", "arguments": "not json"}}
                    ]
                },
                "finish_reason": "tool_calls"
            }]
        }))
        .unwrap();

        let response = convert_chat_response(response).unwrap();
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].native_id.as_deref(), Some("abc"));
        assert_eq!(calls[0].get_string("url"), Some("https://example.com"));
        assert_eq!(calls[1].native_id.as_deref(), Some("call_1"));
        assert!(calls[1].arguments.is_empty());
        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
    }

    #[test]
    fn test_no_choices_is_malformed() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            convert_chat_response(response),
            Err(GatewayError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            classify_status(429, r#"{"error": "slow down"}"#),
            GatewayError::RateLimited(m) if m == "slow down"
        ));
        assert!(matches!(
            classify_status(503, r#"{"error": {"message": "overloaded"}}"#),
            GatewayError::ServerError { status: 503, ref message } if message == "overloaded"
        ));
        assert!(matches!(classify_status(401, ""), GatewayError::Authentication(_)));
        assert!(matches!(classify_status(403, ""), GatewayError::Authentication(_)));
        let err = classify_status(400, "context too long");
        assert!(matches!(err, GatewayError::InvalidRequest(ref m) if m.contains("context too long")));
        assert!(!err.is_transient());
    }
}
