use serde::{Deserialize, Serialize};

use crate::constants::{LEVEL_BREAKPOINTS, MAX_LEVEL, MIN_LEVEL};

/// Estimator output persisted on a problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Continuous hardness in [0, 0.98].
    pub difficulty: f64,
    /// Bucketed difficulty in 1..=5.
    pub level: u8,
    /// Likelihood of misleading the solver, in [0, 0.98].
    pub trickiness: f64,
}

/// Map a difficulty onto a level using the fixed breakpoints.
pub fn level_for_difficulty(difficulty: f64) -> u8 {
    let passed = LEVEL_BREAKPOINTS
        .iter()
        .take_while(|&&bp| difficulty >= bp)
        .count() as u8;
    (MIN_LEVEL + passed).min(MAX_LEVEL)
}
