//! Minimal Firecrawl REST client shared by the web tools.

use crate::config::FileFirecrawlConfig;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirecrawlError {
    #[error("environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Firecrawl request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Firecrawl returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse Firecrawl response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Authenticated client for the Firecrawl v2 API
#[derive(Debug, Clone)]
pub struct FirecrawlClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FirecrawlClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, FirecrawlError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FirecrawlError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &FileFirecrawlConfig) -> Result<Self, FirecrawlError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| FirecrawlError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(
            api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// POST a JSON body to `<base_url>/<path>` and decode the JSON reply.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, FirecrawlError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(FirecrawlError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FirecrawlError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(FirecrawlError::Decode)
    }
}
