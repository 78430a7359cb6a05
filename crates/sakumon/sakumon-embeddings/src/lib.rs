//! # sakumon-embeddings
//!
//! Embedding generation for problems and queries: pluggable providers, an
//! in-memory query cache, dimension validation, and the indexer that fills
//! the vector store.

pub mod cache;
pub mod engine;
pub mod indexer;
pub mod providers;

pub use engine::EmbeddingEngine;
pub use indexer::{EmbeddingIndexer, IndexReport};
pub use providers::{create_provider, HashedTfIdfProvider, OllamaProvider};
