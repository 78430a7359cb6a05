//! Query/candidate token overlap on normalized text.

use std::collections::HashSet;

use crate::normalize::normalize_math_text;

/// A query prepared once for overlap checks against many candidates.
#[derive(Debug, Clone)]
pub struct OverlapQuery {
    normalized: String,
    tokens: HashSet<String>,
}

impl OverlapQuery {
    pub fn new(query: &str) -> Self {
        let normalized = normalize_math_text(query).to_lowercase();
        let tokens = normalized.split_whitespace().map(str::to_string).collect();
        Self { normalized, tokens }
    }

    /// `|Q ∩ T| / |Q|` over whitespace tokens; zero for an empty query.
    pub fn ratio(&self, candidate_normalized: &str) -> f64 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        let candidate: HashSet<&str> = candidate_normalized.split_whitespace().collect();
        let shared = self
            .tokens
            .iter()
            .filter(|t| candidate.contains(t.as_str()))
            .count();
        shared as f64 / self.tokens.len() as f64
    }

    /// Overlap ratio and whether the whole normalized query occurs verbatim
    /// in the candidate.
    pub fn against(&self, candidate_text: &str) -> (f64, bool) {
        let candidate = normalize_math_text(candidate_text).to_lowercase();
        (self.ratio(&candidate), candidate.contains(&self.normalized))
    }
}
