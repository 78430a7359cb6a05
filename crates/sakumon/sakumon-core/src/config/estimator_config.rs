use serde::{Deserialize, Serialize};

use super::defaults;

/// Linear weights of the nine difficulty features.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureWeights {
    pub length: f64,
    pub math: f64,
    pub structural_complexity: f64,
    pub nesting_depth: f64,
    pub operator_density: f64,
    pub solution_length: f64,
    pub step_count: f64,
    pub concept_density: f64,
    pub diagram_presence: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            length: 0.12,
            math: 0.12,
            structural_complexity: 0.12,
            nesting_depth: 0.08,
            operator_density: 0.08,
            solution_length: 0.15,
            step_count: 0.12,
            concept_density: 0.08,
            diagram_presence: 0.03,
        }
    }
}

/// Coefficients of the pairwise interaction terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionWeights {
    /// structural_complexity x length.
    pub structure_length: f64,
    /// operator_density x (1 - solution_length).
    pub operators_unexplained: f64,
    /// concept_density x step_count.
    pub concept_steps: f64,
}

impl Default for InteractionWeights {
    fn default() -> Self {
        Self {
            structure_length: 0.08,
            operators_unexplained: 0.06,
            concept_steps: 0.05,
        }
    }
}

/// Linear weights of the trickiness components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrickinessWeights {
    pub ambiguity: f64,
    pub trap: f64,
    pub mismatch: f64,
    pub structural_complexity: f64,
}

impl Default for TrickinessWeights {
    fn default() -> Self {
        Self {
            ambiguity: 0.35,
            trap: 0.25,
            mismatch: 0.30,
            structural_complexity: 0.10,
        }
    }
}

/// Difficulty/trickiness estimator calibration.
///
/// The defaults are empirical. Use the evaluation harness in
/// `sakumon-retrieval::eval` to compare alternatives against a labeled set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Slope of the logistic squashing.
    pub logistic_gain: f64,
    /// Raw score mapped to difficulty 0.5.
    pub logistic_shift: f64,
    pub feature_weights: FeatureWeights,
    pub interaction: InteractionWeights,
    pub trickiness: TrickinessWeights,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            logistic_gain: defaults::DEFAULT_LOGISTIC_GAIN,
            logistic_shift: defaults::DEFAULT_LOGISTIC_SHIFT,
            feature_weights: FeatureWeights::default(),
            interaction: InteractionWeights::default(),
            trickiness: TrickinessWeights::default(),
        }
    }
}
