use sakumon_core::errors::SakumonResult;
use sakumon_core::models::{NewProblem, ProblemId};
use sakumon_core::traits::IProblemStorage;

use crate::estimator::DifficultyEstimator;

/// Estimate a new problem from its stem and solution, then persist both.
pub fn ingest_problem(
    storage: &dyn IProblemStorage,
    estimator: &DifficultyEstimator,
    problem: &NewProblem,
) -> SakumonResult<ProblemId> {
    let estimate = estimator.estimate(&problem.estimation_text());
    let id = storage.insert(problem, Some(&estimate))?;
    tracing::debug!(
        problem_id = id,
        difficulty = estimate.difficulty,
        level = estimate.level,
        trickiness = estimate.trickiness,
        "problem ingested"
    );
    Ok(id)
}
