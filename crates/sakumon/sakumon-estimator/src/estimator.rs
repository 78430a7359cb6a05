//! Difficulty and trickiness scoring over extracted features.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sakumon_core::config::EstimatorConfig;
use sakumon_core::constants::SCORE_CEILING;
use sakumon_core::models::{level_for_difficulty, Estimate};

use crate::features::{self, Extraction, FeatureVector};

/// Verbose estimator output, serialized into `difficulty_details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateDetails {
    pub difficulty: f64,
    pub level: u8,
    pub trickiness: f64,
    pub features: FeatureVector,
    pub markup: features::MarkupCounts,
    pub operator_count: usize,
    pub step_count: usize,
    pub snippet_chars: usize,
    pub options: Vec<String>,
    pub option_similarity: f64,
    pub trap_score: f64,
    /// Per-feature `w * f` plus the intermediate pipeline values.
    pub contributions: BTreeMap<String, f64>,
}

impl EstimateDetails {
    pub fn estimate(&self) -> Estimate {
        Estimate {
            difficulty: self.difficulty,
            level: self.level,
            trickiness: self.trickiness,
        }
    }
}

/// Rule-based difficulty/trickiness estimator.
///
/// Pure and deterministic: the same text and config always produce
/// bit-identical output.
#[derive(Debug, Clone, Default)]
pub struct DifficultyEstimator {
    config: EstimatorConfig,
}

impl DifficultyEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// `(difficulty, level, trickiness)` for a problem text.
    pub fn estimate(&self, text: &str) -> Estimate {
        self.estimate_verbose(text).estimate()
    }

    /// Estimate with per-feature contributions for debugging and calibration.
    pub fn estimate_verbose(&self, text: &str) -> EstimateDetails {
        let _span = sakumon_observability::estimation_span!(text.len()).entered();
        let extraction = features::extract(text);
        self.score(extraction)
    }

    fn score(&self, extraction: Extraction) -> EstimateDetails {
        let f = extraction.features;
        let w = &self.config.feature_weights;
        let weighted = [
            ("length", w.length * f.length),
            ("math", w.math * f.math),
            (
                "structural_complexity",
                w.structural_complexity * f.structural_complexity,
            ),
            ("nesting_depth", w.nesting_depth * f.nesting_depth),
            ("operator_density", w.operator_density * f.operator_density),
            ("solution_length", w.solution_length * f.solution_length),
            ("step_count", w.step_count * f.step_count),
            ("concept_density", w.concept_density * f.concept_density),
            ("diagram_presence", w.diagram_presence * f.diagram_presence),
        ];
        let linear: f64 = weighted.iter().map(|(_, v)| v).sum();

        let iw = &self.config.interaction;
        let interaction = iw.structure_length * f.structural_complexity * f.length
            + iw.operators_unexplained * f.operator_density * (1.0 - f.solution_length)
            + iw.concept_steps * f.concept_density * f.step_count;

        let raw = linear + interaction;
        let logistic = logistic(
            self.config.logistic_gain * (raw - self.config.logistic_shift),
        );
        let difficulty = logistic.clamp(0.0, SCORE_CEILING);
        let level = level_for_difficulty(difficulty);

        let tw = &self.config.trickiness;
        let ambiguity = extraction.option_similarity;
        let mismatch = (1.0 - f.solution_length) * f.operator_density;
        let trickiness_raw = tw.ambiguity * ambiguity
            + tw.trap * extraction.trap_score
            + tw.mismatch * mismatch
            + tw.structural_complexity * f.structural_complexity;
        let trickiness = trickiness_raw.clamp(0.0, SCORE_CEILING);

        let mut contributions: BTreeMap<String, f64> = weighted
            .iter()
            .map(|(name, v)| (name.to_string(), *v))
            .collect();
        contributions.insert("interaction".to_string(), interaction);
        contributions.insert("linear_sum".to_string(), linear);
        contributions.insert("raw".to_string(), raw);
        contributions.insert("logistic".to_string(), logistic);
        contributions.insert("trickiness_raw".to_string(), trickiness_raw);

        EstimateDetails {
            difficulty,
            level,
            trickiness,
            features: f,
            markup: extraction.markup,
            operator_count: extraction.operator_count,
            step_count: extraction.step_count,
            snippet_chars: extraction.snippet_chars,
            options: extraction.options,
            option_similarity: extraction.option_similarity,
            trap_score: extraction.trap_score,
            contributions,
        }
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
