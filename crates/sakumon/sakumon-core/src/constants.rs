/// sakumon system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound for estimated difficulty and trickiness.
pub const SCORE_CEILING: f64 = 0.98;

/// Difficulty breakpoints separating levels 1..5.
pub const LEVEL_BREAKPOINTS: [f64; 4] = [0.18, 0.36, 0.55, 0.75];

/// Lowest and highest difficulty levels.
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Gap assigned when a target is set but the candidate attribute is missing.
pub const NEUTRAL_GAP_PENALTY: f64 = 0.5;

/// Maximum number of ids per batched `IN (...)` attribute lookup.
pub const MAX_BULK_BATCH_SIZE: usize = 500;

/// Embedding kind used for problem stems in the vector store.
pub const STEM_EMBEDDING_KIND: &str = "stem";
