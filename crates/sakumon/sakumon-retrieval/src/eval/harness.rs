//! Evaluation cases, aggregate runs, and weight grid search.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use sakumon_core::config::RankingWeights;
use sakumon_core::errors::{SakumonError, SakumonResult};
use sakumon_core::models::ProblemId;
use sakumon_core::traits::IProblemStorage;

use super::metrics::{mrr, ndcg_at_k, precision_at_k};
use crate::engine::RetrievalEngine;
use crate::request::RetrievalRequest;

/// A query with the ids that count as correct answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalCase {
    pub query: String,
    pub relevant_ids: Vec<ProblemId>,
    #[serde(default)]
    pub target_difficulty: Option<f64>,
    #[serde(default)]
    pub target_trickiness: Option<f64>,
}

impl EvalCase {
    pub fn new(query: impl Into<String>, relevant_ids: Vec<ProblemId>) -> Self {
        Self {
            query: query.into(),
            relevant_ids,
            target_difficulty: None,
            target_trickiness: None,
        }
    }
}

/// Parse a JSON array of cases.
pub fn parse_cases(json: &str) -> SakumonResult<Vec<EvalCase>> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_cases(path: &Path) -> SakumonResult<Vec<EvalCase>> {
    let json = std::fs::read_to_string(path).map_err(|e| SakumonError::Configuration {
        reason: format!("cannot read eval cases {}: {e}", path.display()),
    })?;
    parse_cases(&json)
}

/// Up to `n` cases whose query is a stored stem and whose only relevant id
/// is that problem. The sample depends only on `seed` and the stored ids.
pub fn self_supervised_cases(
    storage: &dyn IProblemStorage,
    n: usize,
    seed: u64,
) -> SakumonResult<Vec<EvalCase>> {
    let mut rows = storage.load_corpus()?;
    rows.retain(|r| !r.stem.trim().is_empty());
    rows.sort_by_cached_key(|r| sample_key(seed, r.id));
    Ok(rows
        .into_iter()
        .take(n)
        .map(|r| EvalCase::new(r.stem, vec![r.id]))
        .collect())
}

fn sample_key(seed: u64, id: ProblemId) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seed.to_le_bytes());
    hasher.update(&id.to_le_bytes());
    *hasher.finalize().as_bytes()
}

/// How cases are run against the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalOptions {
    pub top_k: usize,
    pub use_vector: bool,
    /// Engine defaults when unset.
    pub weights: Option<RankingWeights>,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            top_k: 10,
            use_vector: false,
            weights: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub query: String,
    pub retrieved: Vec<ProblemId>,
    pub precision: f64,
    pub mrr: f64,
    pub ndcg: f64,
}

/// Mean metrics over a set of cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalSummary {
    pub cases: usize,
    pub precision: f64,
    pub mrr: f64,
    pub ndcg: f64,
    pub per_case: Vec<CaseResult>,
}

impl EvalSummary {
    /// Quality gate on mean reciprocal rank.
    pub fn meets(&self, target_mrr: f64) -> bool {
        self.mrr >= target_mrr
    }
}

pub fn run_eval(
    engine: &RetrievalEngine,
    cases: &[EvalCase],
    options: &EvalOptions,
) -> SakumonResult<EvalSummary> {
    let mut per_case = Vec::with_capacity(cases.len());
    for case in cases {
        let mut request = RetrievalRequest::new(case.query.clone())
            .top_k(options.top_k)
            .use_vector(options.use_vector);
        request.target_difficulty = case.target_difficulty;
        request.target_trickiness = case.target_trickiness;
        request.weights = options.weights;

        let retrieved = engine.retrieve(&request)?.ids();
        per_case.push(CaseResult {
            query: case.query.clone(),
            precision: precision_at_k(&retrieved, &case.relevant_ids, options.top_k),
            mrr: mrr(&retrieved, &case.relevant_ids),
            ndcg: ndcg_at_k(&retrieved, &case.relevant_ids, options.top_k),
            retrieved,
        });
    }

    let n = per_case.len();
    let mean = |f: fn(&CaseResult) -> f64| {
        if n == 0 {
            0.0
        } else {
            per_case.iter().map(f).sum::<f64>() / n as f64
        }
    };
    Ok(EvalSummary {
        cases: n,
        precision: mean(|c| c.precision),
        mrr: mean(|c| c.mrr),
        ndcg: mean(|c| c.ndcg),
        per_case,
    })
}

/// Candidate values for each ranking weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightGrid {
    pub alphas: Vec<f64>,
    pub betas: Vec<f64>,
    pub gammas: Vec<f64>,
}

impl Default for WeightGrid {
    fn default() -> Self {
        Self {
            alphas: vec![0.5, 1.0, 2.0],
            betas: vec![0.5, 1.0, 2.0],
            gammas: vec![0.5, 1.0, 2.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSearchResult {
    pub best_weights: RankingWeights,
    pub best: EvalSummary,
    pub evaluated: usize,
}

/// Exhaustive search for the weights with the highest mean MRR. The first
/// combination wins ties. `None` when the grid is empty.
pub fn grid_search_weights(
    engine: &RetrievalEngine,
    cases: &[EvalCase],
    grid: &WeightGrid,
    options: &EvalOptions,
) -> SakumonResult<Option<GridSearchResult>> {
    let mut best: Option<GridSearchResult> = None;
    let mut evaluated = 0;

    for &alpha in &grid.alphas {
        for &beta in &grid.betas {
            for &gamma in &grid.gammas {
                let weights = RankingWeights::new(alpha, beta, gamma);
                let summary = run_eval(
                    engine,
                    cases,
                    &EvalOptions {
                        weights: Some(weights),
                        ..*options
                    },
                )?;
                evaluated += 1;
                if best.as_ref().map_or(true, |b| summary.mrr > b.best.mrr) {
                    best = Some(GridSearchResult {
                        best_weights: weights,
                        best: summary,
                        evaluated: 0,
                    });
                }
            }
        }
    }

    if let Some(result) = best.as_mut() {
        result.evaluated = evaluated;
        info!(
            evaluated,
            alpha = result.best_weights.alpha,
            beta = result.best_weights.beta,
            gamma = result.best_weights.gamma,
            mrr = result.best.mrr,
            "weight grid search complete"
        );
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cases_parse_with_optional_targets() {
        let cases = parse_cases(
            r#"[{"query": "a", "relevant_ids": [1]},
                {"query": "b", "relevant_ids": [2, 3], "target_difficulty": 0.4}]"#,
        )
        .unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].target_difficulty, Some(0.4));
        assert_eq!(cases[0].target_trickiness, None);
    }

    #[test]
    fn malformed_cases_are_serialization_errors() {
        let err = parse_cases("{not json").unwrap_err();
        assert!(matches!(err, SakumonError::Serialization(_)));
    }

    #[test]
    fn sample_key_depends_on_seed() {
        assert_eq!(sample_key(1, 5), sample_key(1, 5));
        assert_ne!(sample_key(1, 5), sample_key(2, 5));
    }

    #[test]
    fn meets_is_inclusive() {
        let summary = EvalSummary {
            mrr: 0.5,
            ..Default::default()
        };
        assert!(summary.meets(0.5));
        assert!(!summary.meets(0.51));
    }
}
