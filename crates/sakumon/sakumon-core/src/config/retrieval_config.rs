use serde::{Deserialize, Serialize};

use super::defaults;

/// Relative weights of the three ranking objectives.
///
/// Scaling all three by the same positive constant leaves the relative order
/// produced by the weighted sum unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    /// Weight on standardized text similarity.
    pub alpha: f64,
    /// Weight on standardized difficulty gap (subtracted).
    pub beta: f64,
    /// Weight on standardized trickiness gap (subtracted).
    pub gamma: f64,
}

impl RankingWeights {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Multiply every weight by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            alpha: self.alpha * factor,
            beta: self.beta * factor,
            gamma: self.gamma * factor,
        }
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            alpha: defaults::DEFAULT_ALPHA_TEXT,
            beta: defaults::DEFAULT_BETA_DIFFICULTY,
            gamma: defaults::DEFAULT_GAMMA_TRICKINESS,
        }
    }
}

/// Re-ranking knobs that are not objective weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Multiplier applied to the token-overlap ratio when the boost fires.
    pub overlap_boost: f64,
    /// Overlap ratio above which the boost fires.
    pub overlap_threshold: f64,
    /// Characters of candidate text kept in the result snippet.
    pub snippet_chars: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            overlap_boost: defaults::DEFAULT_OVERLAP_BOOST,
            overlap_threshold: defaults::DEFAULT_OVERLAP_THRESHOLD,
            snippet_chars: defaults::DEFAULT_SNIPPET_CHARS,
        }
    }
}

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Default number of results returned.
    pub top_k: usize,
    /// Raw candidates requested per returned result before re-ranking.
    pub candidate_multiplier: usize,
    /// Attempt vector search first when an embedding model is available.
    pub use_vector: bool,
    /// Default objective weights.
    pub weights: RankingWeights,
    /// Overlap boost and snippet settings.
    pub ranker: RankerConfig,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            candidate_multiplier: defaults::DEFAULT_CANDIDATE_MULTIPLIER,
            use_vector: defaults::DEFAULT_USE_VECTOR,
            weights: RankingWeights::default(),
            ranker: RankerConfig::default(),
        }
    }
}
