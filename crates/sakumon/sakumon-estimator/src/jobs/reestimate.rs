use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use sakumon_core::errors::SakumonResult;
use sakumon_core::models::{Estimate, ProblemId};
use sakumon_core::traits::IProblemStorage;
use sakumon_observability::tracing_setup::events;

use crate::estimator::DifficultyEstimator;

/// Options for a re-estimation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReestimateOptions {
    /// Process at most this many problems (ascending id).
    pub limit: Option<usize>,
    /// Compute but do not write.
    pub dry_run: bool,
}

/// One recomputed problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReestimateEntry {
    pub id: ProblemId,
    pub previous_level: Option<u8>,
    pub estimate: Estimate,
}

impl ReestimateEntry {
    pub fn level_changed(&self) -> bool {
        self.previous_level != Some(self.estimate.level)
    }
}

/// Outcome of a re-estimation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReestimateReport {
    pub scanned: usize,
    pub updated: usize,
    pub dry_run: bool,
    pub entries: Vec<ReestimateEntry>,
}

impl ReestimateReport {
    pub fn level_changes(&self) -> usize {
        self.entries.iter().filter(|e| e.level_changed()).count()
    }
}

/// Recompute difficulty, level, trickiness, and details for stored problems.
///
/// Estimation runs in parallel; writes go through the storage writer one at a
/// time. With `dry_run` nothing is written.
pub fn reestimate(
    storage: &dyn IProblemStorage,
    estimator: &DifficultyEstimator,
    options: ReestimateOptions,
) -> SakumonResult<ReestimateReport> {
    let problems = storage.list_for_estimation(options.limit)?;

    let computed: Vec<_> = problems
        .par_iter()
        .map(|p| {
            let details = estimator.estimate_verbose(&p.estimation_text());
            (p.id, p.difficulty_level, details)
        })
        .collect();

    let mut report = ReestimateReport {
        scanned: computed.len(),
        dry_run: options.dry_run,
        ..Default::default()
    };

    for (id, previous_level, details) in computed {
        let estimate = details.estimate();
        if !options.dry_run {
            let json = serde_json::to_string(&details)?;
            storage.update_estimate(id, &estimate, Some(&json))?;
            report.updated += 1;
        }
        report.entries.push(ReestimateEntry {
            id,
            previous_level,
            estimate,
        });
    }

    events::reestimate_completed(report.scanned, report.updated, report.dry_run);
    Ok(report)
}
