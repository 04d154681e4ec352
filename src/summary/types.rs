//! Summarizer Types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How bad the diagnosed situation is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

/// One conflicting component handed to the summarizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Human-readable component label
    pub name: String,
    /// Shortened fatal error captured during the probe
    pub error: String,
}

impl ConflictReport {
    pub fn new(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error: error.into(),
        }
    }
}

/// End-of-scan summary handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub summary: String,
    pub recommendation: String,
    pub technical_details: String,
    pub severity: Severity,
}

impl Diagnosis {
    /// Deterministic "all clear" response for an empty conflict set.
    pub fn all_clear() -> Self {
        Self {
            summary: "No conflicts detected; every probed component came back healthy."
                .to_string(),
            recommendation: "No action needed.".to_string(),
            technical_details: String::new(),
            severity: Severity::Low,
        }
    }

    /// Deterministic fallback when the external summarizer fails. The raw
    /// failure reason is preserved in `technical_details`.
    pub fn fallback(conflicts: &[ConflictReport], reason: &str) -> Self {
        let lead = conflicts
            .first()
            .map(|c| c.name.as_str())
            .unwrap_or("unknown");
        Self {
            summary: format!(
                "{} component(s) triggered fatal errors during the isolation scan; the first conflict was '{}'.",
                conflicts.len(),
                lead
            ),
            recommendation:
                "Keep the conflicting component(s) disabled and share the captured errors with their developer."
                    .to_string(),
            technical_details: reason.to_string(),
            severity: Severity::Medium,
        }
    }
}

/// Configuration for the external text-completion service.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 400,
            timeout: Duration::from_secs(30),
        }
    }
}
