//! Offline retrieval quality measurement and weight calibration.

pub mod harness;
pub mod metrics;

pub use harness::{
    grid_search_weights, load_cases, parse_cases, run_eval, self_supervised_cases, CaseResult,
    EvalCase, EvalOptions, EvalSummary, GridSearchResult, WeightGrid,
};
pub use metrics::{dcg_at_k, idcg_at_k, mrr, ndcg_at_k, precision_at_k};
