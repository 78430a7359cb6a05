mod embedding;
mod storage;
mod vector_store;

pub use embedding::IEmbeddingProvider;
pub use storage::IProblemStorage;
pub use vector_store::{IVectorStore, ShardPredicate};
