//! Hugging Face inference router gateway

use super::types::{
    ChatResponse, build_chat_request, classify_status, classify_transport_error,
    convert_chat_response,
};
use crate::config::FileHuggingFaceConfig;
use async_trait::async_trait;
use research_application::{CompletionRequest, GatewayError, LlmGateway};
use research_domain::LlmResponse;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// `LlmGateway` backed by the OpenAI-compatible Hugging Face router
///
/// Each call is a single stateless `POST <base_url>/chat/completions`.
/// The provider of a `ModelSpec` is passed as a `:provider` suffix on the
/// model name.
pub struct HuggingFaceGateway {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl HuggingFaceGateway {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GatewayError::Authentication(
                "Hugging Face API key is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    /// Build from the `[providers.huggingface]` section, reading the key
    /// from the configured environment variable.
    pub fn from_config(config: &FileHuggingFaceConfig) -> Result<Self, GatewayError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            GatewayError::Authentication(format!(
                "environment variable {} is not set",
                config.api_key_env
            ))
        })?;
        Self::new(
            api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmGateway for HuggingFaceGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<LlmResponse, GatewayError> {
        let body = build_chat_request(&request);
        debug!(
            model = %body.model,
            messages = body.messages.len(),
            tools = body.tools.len(),
            structured = body.response_format.is_some(),
            "Sending chat completion"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &text));
        }

        let text = response
            .text()
            .await
            .map_err(|e| classify_transport_error(&e))?;
        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::MalformedResponse(format!("invalid JSON body: {}", e)))?;

        convert_chat_response(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_rejected() {
        let result = HuggingFaceGateway::new(" ", "https://router.example/v1", Duration::from_secs(5));
        assert!(matches!(result, Err(GatewayError::Authentication(_))));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let gateway =
            HuggingFaceGateway::new("hf_x", "https://router.example/v1/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(gateway.endpoint(), "https://router.example/v1/chat/completions");
    }

    #[test]
    fn test_missing_env_var_is_authentication_error() {
        let config = FileHuggingFaceConfig {
            api_key_env: "DEEP_RESEARCH_TEST_UNSET_TOKEN_VAR".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HuggingFaceGateway::from_config(&config),
            Err(GatewayError::Authentication(m)) if m.contains("DEEP_RESEARCH_TEST_UNSET_TOKEN_VAR")
        ));
    }
}
