// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "sakumon.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashed";
pub const DEFAULT_EMBEDDING_MODEL: &str = "paraphrase-multilingual-mpnet-base-v2";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 768;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_EMBEDDING_VERSION: &str = "v1";

// --- Vector search ---
pub const DEFAULT_SHARD_COUNT: usize = 1;
pub const DEFAULT_PER_SHARD_SLACK: usize = 10;
pub const DEFAULT_MAX_SHARD_WORKERS: usize = 8;
pub const DEFAULT_VECTOR_TIMEOUT_MS: u64 = 3_000;

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 3;
pub const DEFAULT_USE_VECTOR: bool = true;
pub const DEFAULT_ALPHA_TEXT: f64 = 0.5;
pub const DEFAULT_BETA_DIFFICULTY: f64 = 0.5;
pub const DEFAULT_GAMMA_TRICKINESS: f64 = 0.5;
pub const DEFAULT_OVERLAP_BOOST: f64 = 0.5;
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.4;
pub const DEFAULT_SNIPPET_CHARS: usize = 500;

// --- Estimator ---
pub const DEFAULT_LOGISTIC_GAIN: f64 = 6.0;
pub const DEFAULT_LOGISTIC_SHIFT: f64 = 0.25;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
