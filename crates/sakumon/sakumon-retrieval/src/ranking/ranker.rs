//! Multi-objective re-ranking: text similarity against attribute fit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use sakumon_core::config::{RankerConfig, RankingWeights};
use sakumon_core::constants::NEUTRAL_GAP_PENALTY;
use sakumon_core::models::{CandidateScore, ProblemAttributes, ProblemId, RankedProblem};

use super::overlap::OverlapQuery;
use super::standardize::standardize;

/// Caller targets for the stored attributes. Unset targets contribute no
/// penalty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub difficulty: Option<f64>,
    pub trickiness: Option<f64>,
}

impl Targets {
    pub fn new(difficulty: Option<f64>, trickiness: Option<f64>) -> Self {
        Self {
            difficulty,
            trickiness,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankerConfig,
}

impl Ranker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Score every candidate, in candidate order.
    ///
    /// `candidates` are `(id, raw similarity)` from either backend;
    /// `attributes` may miss ids (deleted since the search), which then
    /// count as missing attributes with empty text.
    pub fn score_candidates(
        &self,
        query: &str,
        candidates: &[(ProblemId, f64)],
        attributes: &[ProblemAttributes],
        targets: Targets,
        weights: RankingWeights,
    ) -> Vec<CandidateScore> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let by_id: HashMap<ProblemId, &ProblemAttributes> =
            attributes.iter().map(|a| (a.id, a)).collect();
        let attrs: Vec<Option<&ProblemAttributes>> =
            candidates.iter().map(|(id, _)| by_id.get(id).copied()).collect();

        let text: Vec<f64> = candidates.iter().map(|(_, s)| *s).collect();
        let difficulty_gaps: Vec<f64> = attrs
            .iter()
            .map(|a| gap(a.and_then(|a| a.difficulty), targets.difficulty))
            .collect();
        let trickiness_gaps: Vec<f64> = attrs
            .iter()
            .map(|a| gap(a.and_then(|a| a.trickiness), targets.trickiness))
            .collect();

        let z_text = standardize(&text);
        let z_difficulty = standardize(&difficulty_gaps);
        let z_trickiness = standardize(&trickiness_gaps);

        let overlap_query = OverlapQuery::new(query);

        candidates
            .iter()
            .enumerate()
            .map(|(i, &(id, raw_similarity))| {
                let attr = attrs[i];
                let base = weights.alpha * z_text[i]
                    - weights.beta * z_difficulty[i]
                    - weights.gamma * z_trickiness[i];

                let text = attr.map_or("", |a| a.text.as_str());
                let (overlap, substring) = overlap_query.against(text);
                let overlap_boost = if overlap > self.config.overlap_threshold || substring {
                    self.config.overlap_boost * overlap
                } else {
                    0.0
                };

                CandidateScore {
                    id,
                    raw_similarity,
                    difficulty: attr.and_then(|a| a.difficulty),
                    trickiness: attr.and_then(|a| a.trickiness),
                    z_text: z_text[i],
                    z_difficulty_gap: z_difficulty[i],
                    z_trickiness_gap: z_trickiness[i],
                    overlap,
                    overlap_boost,
                    combined_score: base + overlap_boost,
                }
            })
            .collect()
    }

    /// Rank candidates best first and keep `top_k`. Equal scores keep
    /// candidate order.
    pub fn rank(
        &self,
        query: &str,
        candidates: &[(ProblemId, f64)],
        attributes: &[ProblemAttributes],
        targets: Targets,
        weights: RankingWeights,
        top_k: usize,
    ) -> Vec<RankedProblem> {
        let texts: HashMap<ProblemId, &str> = attributes
            .iter()
            .map(|a| (a.id, a.text.as_str()))
            .collect();

        let mut ranked: Vec<RankedProblem> = self
            .score_candidates(query, candidates, attributes, targets, weights)
            .into_iter()
            .map(|s| RankedProblem {
                id: s.id,
                text_score: s.raw_similarity,
                difficulty: s.difficulty,
                trickiness: s.trickiness,
                combined_score: s.combined_score,
                snippet: texts
                    .get(&s.id)
                    .map(|t| t.chars().take(self.config.snippet_chars).collect())
                    .unwrap_or_default(),
            })
            .collect();

        ranked.sort_by(|a, b| b.combined_score.total_cmp(&a.combined_score));
        ranked.truncate(top_k);
        ranked
    }
}

/// `|attribute - target|`; no target means no penalty, a target with a
/// missing attribute gets the neutral penalty.
fn gap(attribute: Option<f64>, target: Option<f64>) -> f64 {
    match (target, attribute) {
        (None, _) => 0.0,
        (Some(t), Some(a)) => (a - t).abs(),
        (Some(_), None) => NEUTRAL_GAP_PENALTY,
    }
}
