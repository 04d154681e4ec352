//! Registry Error Types

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Component not found: {file}")]
    NotFound { file: String },

    #[error("Failed to enable '{file}': {message}")]
    EnableFailed { file: String, message: String },

    #[error("Registry unavailable: {message}")]
    Unavailable { message: String },

    #[error("Registry IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
