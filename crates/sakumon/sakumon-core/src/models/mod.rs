mod degradation_event;
mod estimate;
mod fingerprint;
mod problem;
mod ranking;

pub use degradation_event::DegradationEvent;
pub use estimate::{level_for_difficulty, Estimate};
pub use fingerprint::Fingerprint;
pub use problem::{
    normalize_attribute, parse_attribute, CorpusRow, NewProblem, Problem, ProblemAttributes,
    ProblemId,
};
pub use ranking::{CandidateScore, RankedProblem, SearchBackend};
