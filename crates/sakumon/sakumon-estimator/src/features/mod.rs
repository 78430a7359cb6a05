//! Feature extraction: raw problem text to a normalized feature vector.
//!
//! Every feature is a count divided by an empirical ceiling and clamped to
//! [0, 1]. Extraction never fails; empty text yields all zeros.

pub mod choices;
pub mod lexicon;
pub mod markup;
pub mod patterns;
pub mod solution;

use serde::{Deserialize, Serialize};

pub use markup::MarkupCounts;

const LENGTH_CEILING: f64 = 3000.0;
const MATH_CEILING: f64 = 10.0;
const CONSTRUCT_CEILING: f64 = 6.0;
const DEPTH_CEILING: f64 = 8.0;
const OPERATOR_CEILING: f64 = 20.0;
const SOLUTION_CEILING: f64 = 1500.0;
const STEP_CEILING: f64 = 10.0;

/// The nine normalized difficulty features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
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

impl FeatureVector {
    /// `(name, value)` pairs in a fixed order.
    pub fn named(&self) -> [(&'static str, f64); 9] {
        [
            ("length", self.length),
            ("math", self.math),
            ("structural_complexity", self.structural_complexity),
            ("nesting_depth", self.nesting_depth),
            ("operator_density", self.operator_density),
            ("solution_length", self.solution_length),
            ("step_count", self.step_count),
            ("concept_density", self.concept_density),
            ("diagram_presence", self.diagram_presence),
        ]
    }
}

/// Everything extracted from one text: normalized features plus the raw
/// signals behind them and the trickiness inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub features: FeatureVector,
    pub markup: MarkupCounts,
    pub operator_count: usize,
    pub step_count: usize,
    pub snippet_chars: usize,
    pub options: Vec<String>,
    pub option_similarity: f64,
    pub trap_score: f64,
}

fn ratio(count: f64, ceiling: f64) -> f64 {
    (count / ceiling).clamp(0.0, 1.0)
}

/// Extract features and auxiliary signals from problem text.
pub fn extract(text: &str) -> Extraction {
    if text.is_empty() {
        return Extraction::default();
    }

    let snippet = solution::solution_snippet(text);
    let snippet_chars = snippet.chars().count();
    let step_count = solution::count_steps(snippet);
    let operator_count = markup::count_operators(text);
    let markup = MarkupCounts::of(text);
    let options = choices::extract_options(text);
    let option_similarity = choices::option_similarity(&options);

    let features = FeatureVector {
        length: ratio(text.chars().count() as f64, LENGTH_CEILING),
        math: ratio(markup.weighted_math() as f64, MATH_CEILING),
        structural_complexity: ratio(markup.constructs() as f64, CONSTRUCT_CEILING),
        nesting_depth: ratio(markup.max_depth as f64, DEPTH_CEILING),
        operator_density: ratio(operator_count as f64, OPERATOR_CEILING),
        solution_length: ratio(snippet_chars as f64, SOLUTION_CEILING),
        step_count: ratio(step_count as f64, STEP_CEILING),
        concept_density: lexicon::concept_density(text).clamp(0.0, 1.0),
        diagram_presence: if lexicon::has_diagram(text) { 1.0 } else { 0.0 },
    };

    Extraction {
        features,
        markup,
        operator_count,
        step_count,
        snippet_chars,
        options,
        option_similarity,
        trap_score: lexicon::trap_score(text),
    }
}
