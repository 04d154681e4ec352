//! Scan Error Types

use std::fmt;

/// Scan error types
#[derive(Debug, Clone)]
pub enum ScanError {
    /// Component registry call failed
    Registry { message: String },
    /// Snapshot store call failed
    Snapshot { message: String },
    /// Session is in the wrong state for the requested operation
    Session { message: String },
    /// Invalid configuration
    Configuration { message: String },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Registry { message } => write!(f, "Registry error: {}", message),
            ScanError::Snapshot { message } => write!(f, "Snapshot error: {}", message),
            ScanError::Session { message } => write!(f, "Session error: {}", message),
            ScanError::Configuration { message } => write!(f, "Configuration error: {}", message),
        }
    }
}

impl std::error::Error for ScanError {}

impl crate::core::error_handling::ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        match self {
            ScanError::Configuration { .. } => true, // User can fix config issues
            ScanError::Session { .. } => true,       // User drove the machine out of order
            ScanError::Registry { .. } => false,     // Host/adapter issues
            ScanError::Snapshot { .. } => false,     // Storage issues
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ScanError::Configuration { message } => Some(message),
            ScanError::Session { message } => Some(message),
            _ => None,
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
