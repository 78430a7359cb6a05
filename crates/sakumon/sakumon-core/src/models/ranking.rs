use serde::{Deserialize, Serialize};

use super::problem::ProblemId;

/// Which first-pass similarity backend produced the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchBackend {
    Vector,
    Lexical,
}

impl std::fmt::Display for SearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchBackend::Vector => f.write_str("vector"),
            SearchBackend::Lexical => f.write_str("lexical"),
        }
    }
}

/// Per-candidate scoring breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub id: ProblemId,
    pub raw_similarity: f64,
    pub difficulty: Option<f64>,
    pub trickiness: Option<f64>,
    pub z_text: f64,
    pub z_difficulty_gap: f64,
    pub z_trickiness_gap: f64,
    /// Token-overlap ratio between query and candidate text.
    pub overlap: f64,
    pub overlap_boost: f64,
    pub combined_score: f64,
}

/// A ranked retrieval result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProblem {
    pub id: ProblemId,
    pub text_score: f64,
    pub difficulty: Option<f64>,
    pub trickiness: Option<f64>,
    pub combined_score: f64,
    pub snippet: String,
}
