//! Text-completion provider boundary
//!
//! The summarizer talks to an external chat-completion service through the
//! [`TextCompletion`] trait so tests can substitute a double and the gateway
//! never depends on a concrete wire client.

use crate::summary::error::{SummaryError, SummaryResult};
use crate::summary::types::SummarizerConfig;
use async_trait::async_trait;
use serde::Serialize;

/// One chat message in a completion request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Per-call payload; model parameters live in the provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    /// Passed through as the service's `response_format` field; the
    /// summarizer uses the JSON-object mode
    pub response_format: Option<serde_json::Value>,
}

#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Run one completion and return the assistant message content.
    async fn complete(&self, request: CompletionRequest) -> SummaryResult<String>;
}

/// Stand-in provider used when no usable service configuration exists.
/// Every call fails with `NotConfigured`, which the gateway folds into its
/// deterministic fallback Diagnosis.
pub struct UnconfiguredCompletion;

#[async_trait]
impl TextCompletion for UnconfiguredCompletion {
    async fn complete(&self, _request: CompletionRequest) -> SummaryResult<String> {
        Err(SummaryError::NotConfigured {
            message: "no API key set".to_string(),
        })
    }
}

/// reqwest-backed client for OpenAI-compatible chat-completion endpoints.
pub struct HttpTextCompletion {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

impl HttpTextCompletion {
    pub fn new(config: &SummarizerConfig) -> SummaryResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(SummaryError::NotConfigured {
                message: "API key not set".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SummaryError::Network {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.trim().to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout.as_secs(),
        })
    }
}

#[async_trait]
impl TextCompletion for HttpTextCompletion {
    async fn complete(&self, request: CompletionRequest) -> SummaryResult<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "response_format": request.response_format,
        });

        log::debug!(
            "Requesting completion from {} (model {})",
            self.endpoint,
            self.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SummaryError::Timeout {
                        seconds: self.timeout_secs,
                    }
                } else {
                    SummaryError::Network {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        let payload: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| SummaryError::InvalidResponse {
                    message: format!("body is not JSON: {}", e),
                })?;

        if !status.is_success() {
            let message = payload["error"]["message"]
                .as_str()
                .unwrap_or("service returned an error")
                .to_string();
            return Err(SummaryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| SummaryError::InvalidResponse {
                message: "response has no choices[0].message.content".to_string(),
            })
    }
}
