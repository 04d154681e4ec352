//! Summarizer Error Types

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Summarizer not configured: {message}")]
    NotConfigured { message: String },
}

/// Result type for summarizer operations
pub type SummaryResult<T> = Result<T, SummaryError>;
