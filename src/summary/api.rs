//! Public API for the summarizer module

pub use crate::summary::error::{SummaryError, SummaryResult};
pub use crate::summary::gateway::Summarizer;
pub use crate::summary::provider::{
    ChatMessage, CompletionRequest, HttpTextCompletion, TextCompletion, UnconfiguredCompletion,
};
pub use crate::summary::types::{ConflictReport, Diagnosis, Severity, SummarizerConfig};
