//! Summarizer Gateway
//!
//! Turns the set of {component, error} conflicts into a natural-language
//! Diagnosis. Summarization is strictly best-effort: every failure path
//! collapses into a deterministic fallback Diagnosis, never an error, so a
//! broken or unconfigured summarizer can never block restoring the host.

use crate::logtail::api::redact;
use crate::summary::provider::{
    ChatMessage, CompletionRequest, HttpTextCompletion, TextCompletion, UnconfiguredCompletion,
};
use crate::summary::types::{ConflictReport, Diagnosis, SummarizerConfig};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are helping diagnose a broken web application. \
Optional components were re-enabled one at a time and the listed ones caused fatal errors. \
Respond with a single JSON object with string keys \"summary\", \"recommendation\", \
\"technical_details\" and \"severity\" (one of \"low\", \"medium\", \"high\"). \
Keep the summary under 120 words.";

pub struct Summarizer {
    provider: Arc<dyn TextCompletion>,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn TextCompletion>) -> Self {
        Self { provider }
    }

    /// Build from configuration. An unusable configuration (typically a
    /// missing API key) degrades to the fallback path instead of failing.
    pub fn from_config(config: &SummarizerConfig) -> Self {
        match HttpTextCompletion::new(config) {
            Ok(provider) => Self::new(Arc::new(provider)),
            Err(error) => {
                log::warn!("External summarizer disabled: {}", error);
                Self::new(Arc::new(UnconfiguredCompletion))
            }
        }
    }

    /// Produce a Diagnosis for the given conflicts.
    ///
    /// An empty conflict set short-circuits to the all-clear Diagnosis
    /// without touching the provider.
    pub async fn summarize(&self, conflicts: &[ConflictReport]) -> Diagnosis {
        if conflicts.is_empty() {
            log::debug!("No conflicts to summarize, returning all-clear");
            return Diagnosis::all_clear();
        }

        let request = Self::build_request(conflicts);
        match self.provider.complete(request).await {
            Ok(content) => match Self::parse_diagnosis(&content) {
                Ok(diagnosis) => diagnosis,
                Err(reason) => {
                    log::warn!("Summarizer response was unusable: {}", reason);
                    Diagnosis::fallback(conflicts, &reason)
                }
            },
            Err(e) => {
                log::warn!("Summarizer call failed: {}", e);
                Diagnosis::fallback(conflicts, &e.to_string())
            }
        }
    }

    fn build_request(conflicts: &[ConflictReport]) -> CompletionRequest {
        let mut listing = String::from("Conflicting components:\n");
        for conflict in conflicts {
            listing.push_str(&format!("- {}: {}\n", conflict.name, redact(&conflict.error)));
        }

        CompletionRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(listing),
            ],
            response_format: Some(serde_json::json!({ "type": "json_object" })),
        }
    }

    fn parse_diagnosis(content: &str) -> Result<Diagnosis, String> {
        if let Ok(diagnosis) = serde_json::from_str::<Diagnosis>(content) {
            return Ok(diagnosis);
        }

        // Some services wrap the JSON in prose or code fences; retry on the
        // outermost object
        if let (Some(start), Some(end)) = (content.find('{'), content.rfind('}')) {
            if start < end {
                if let Ok(diagnosis) = serde_json::from_str::<Diagnosis>(&content[start..=end]) {
                    return Ok(diagnosis);
                }
            }
        }

        Err(format!(
            "unparseable summarizer response: {}",
            content.chars().take(200).collect::<String>()
        ))
    }
}
