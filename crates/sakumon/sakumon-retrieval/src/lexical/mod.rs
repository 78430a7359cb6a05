//! Process-local lexical (TF-IDF) search with a fingerprinted index cache.

pub mod analyzer;
pub mod cache;
pub mod index;
pub mod model;
pub mod searcher;

pub use analyzer::Analyzer;
pub use cache::LexicalIndexCache;
pub use index::LexicalIndex;
pub use model::{SparseVector, TfIdfModel};
pub use searcher::LexicalSearcher;
