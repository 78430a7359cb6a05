//! # sakumon-storage
//!
//! SQLite persistence for problems and their embeddings: a single write
//! connection, a round-robin read pool, versioned migrations, and a
//! brute-force vector store over stored embeddings.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod vector_store;

pub use engine::StorageEngine;
pub use vector_store::SqliteVectorStore;

use sakumon_core::errors::{SakumonError, StorageError};

/// Wrap a low-level failure message as a storage error.
pub(crate) fn to_storage_err(message: String) -> SakumonError {
    SakumonError::Storage(StorageError::SqliteError { message })
}
