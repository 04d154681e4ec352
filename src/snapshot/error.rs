//! Snapshot Store Error Types

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot IO error: {message}")]
    Io { message: String },

    #[error("Snapshot record is malformed: {message}")]
    Malformed { message: String },
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        SnapshotError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;
