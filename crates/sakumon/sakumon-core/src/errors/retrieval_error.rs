/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// Every available backend failed; distinct from an empty result list.
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}
