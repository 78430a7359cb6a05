//! Retrieval request and response types.

use serde::{Deserialize, Serialize};

use sakumon_core::config::RankingWeights;
use sakumon_core::models::{DegradationEvent, RankedProblem, SearchBackend};

/// One retrieval call. Unset fields take the engine's configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalRequest {
    pub query: String,
    pub top_k: Option<usize>,
    pub target_difficulty: Option<f64>,
    pub target_trickiness: Option<f64>,
    pub weights: Option<RankingWeights>,
    pub use_vector: Option<bool>,
    /// Rebuild the lexical index even if the corpus fingerprint is unchanged
    /// (needed after in-place text edits).
    pub force_lexical_refresh: bool,
}

impl RetrievalRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn target_difficulty(mut self, difficulty: f64) -> Self {
        self.target_difficulty = Some(difficulty);
        self
    }

    pub fn target_trickiness(mut self, trickiness: f64) -> Self {
        self.target_trickiness = Some(trickiness);
        self
    }

    pub fn weights(mut self, weights: RankingWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn use_vector(mut self, use_vector: bool) -> Self {
        self.use_vector = Some(use_vector);
        self
    }

    pub fn force_lexical_refresh(mut self) -> Self {
        self.force_lexical_refresh = true;
        self
    }
}

/// Ranked results plus which backend produced the candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResponse {
    pub results: Vec<RankedProblem>,
    pub backend: SearchBackend,
    /// Raw candidates handed to the ranker.
    pub candidates: usize,
    /// Set when the vector backend was attempted and lexical search answered.
    pub fallback: Option<DegradationEvent>,
}

impl RetrievalResponse {
    pub fn empty(backend: SearchBackend) -> Self {
        Self {
            results: Vec::new(),
            backend,
            candidates: 0,
            fallback: None,
        }
    }

    pub fn fell_back(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn ids(&self) -> Vec<sakumon_core::models::ProblemId> {
        self.results.iter().map(|r| r.id).collect()
    }
}
