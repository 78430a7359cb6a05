mod embedding_error;
mod retrieval_error;
mod sakumon_error;
mod storage_error;

pub use embedding_error::EmbeddingError;
pub use retrieval_error::RetrievalError;
pub use sakumon_error::SakumonError;
pub use storage_error::StorageError;

/// Convenience alias used throughout the workspace.
pub type SakumonResult<T> = Result<T, SakumonError>;
