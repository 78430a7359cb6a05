//! # sakumon-core
//!
//! Foundation crate for the sakumon problem-retrieval system.
//! Defines the shared types, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SakumonConfig;
pub use errors::{SakumonError, SakumonResult};
pub use models::{
    CorpusRow, Estimate, Fingerprint, NewProblem, Problem, ProblemAttributes, ProblemId,
    RankedProblem, SearchBackend,
};
pub use traits::{IEmbeddingProvider, IProblemStorage, IVectorStore, ShardPredicate};
