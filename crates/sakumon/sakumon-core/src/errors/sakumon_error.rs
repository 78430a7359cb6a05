use super::{EmbeddingError, RetrievalError, StorageError};

/// Top-level error type for the sakumon system.
#[derive(Debug, thiserror::Error)]
pub enum SakumonError {
    /// Fatal misconfiguration: never silently downgraded.
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// A remote collaborator failed or timed out.
    #[error("backend unavailable: {backend}: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    #[error("problem not found: {id}")]
    ProblemNotFound { id: i64 },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SakumonError {
    /// Whether this error is a configuration problem that must surface as-is.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SakumonError::Configuration { .. }
                | SakumonError::Embedding(EmbeddingError::DimensionMismatch { .. })
        )
    }

    /// Whether a fallback path may recover from this error.
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(
            self,
            SakumonError::BackendUnavailable { .. }
                | SakumonError::Embedding(
                    EmbeddingError::ModelLoadFailed { .. }
                        | EmbeddingError::InferenceFailed { .. }
                        | EmbeddingError::ProviderUnavailable { .. }
                        | EmbeddingError::Timeout { .. }
                )
        )
    }
}
