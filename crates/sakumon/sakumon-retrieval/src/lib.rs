//! # sakumon-retrieval
//!
//! Finds stored problems for a query and re-ranks them by how well their
//! difficulty and trickiness match caller targets.
//!
//! ## Architecture
//!
//! ```text
//! RetrievalEngine
//! ├── VectorSimilarityClient (sharded nearest-neighbor, deadline-bounded)
//! ├── LexicalIndexCache (fingerprinted TF-IDF index, atomic swap)
//! │   └── LexicalSearcher (storage glue)
//! ├── Ranker (z-scored text/difficulty/trickiness + overlap boost)
//! └── normalize (math markup → matchable tokens)
//!
//! eval: precision@k, MRR, NDCG, self-supervised cases, weight grid search
//! ```

pub mod engine;
pub mod eval;
pub mod lexical;
pub mod normalize;
pub mod ranking;
pub mod request;
pub mod vector;

pub use engine::{RetrievalEngine, VectorAttempt};
pub use lexical::{LexicalIndex, LexicalIndexCache, LexicalSearcher};
pub use normalize::normalize_math_text;
pub use ranking::{Ranker, Targets};
pub use request::{RetrievalRequest, RetrievalResponse};
pub use vector::VectorSimilarityClient;
