//! Re-ranking of first-pass candidates.

pub mod overlap;
pub mod ranker;
pub mod standardize;

pub use ranker::{Ranker, Targets};
pub use standardize::{min_max, standardize};
