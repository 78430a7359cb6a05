//! Jobs that persist estimator output.

mod ingest;
mod reestimate;

pub use ingest::ingest_problem;
pub use reestimate::{reestimate, ReestimateEntry, ReestimateOptions, ReestimateReport};
