//! # sakumon-estimator
//!
//! Rule-based difficulty and trickiness estimation for exam problems, plus
//! the ingestion and re-estimation jobs that persist its output.

pub mod estimator;
pub mod features;
pub mod jobs;

pub use estimator::{DifficultyEstimator, EstimateDetails};
pub use features::{extract, Extraction, FeatureVector};
pub use jobs::{ingest_problem, reestimate, ReestimateOptions, ReestimateReport};
