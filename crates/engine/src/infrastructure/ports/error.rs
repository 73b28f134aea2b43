//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Narration-to-audio failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AudioError {
    #[error("No text to narrate")]
    EmptyText,
    #[error("Narration audio is not configured")]
    Unavailable,
    #[error("Speech synthesis failed: {0}")]
    RequestFailed(String),
}
