use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector similarity client configuration.
///
/// Sharding only pays off when a single nearest-neighbor query is slower than
/// the cost of dispatching several; keep `shard_count = 1` unless measured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Number of `id mod n` partitions queried concurrently.
    pub shard_count: usize,
    /// Extra results each shard requests beyond its fair share of `top_k`.
    pub per_shard_slack: usize,
    /// Upper bound on concurrently running shard queries.
    pub max_shard_workers: usize,
    /// Deadline for one vector search call (milliseconds).
    pub timeout_ms: u64,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            shard_count: defaults::DEFAULT_SHARD_COUNT,
            per_shard_slack: defaults::DEFAULT_PER_SHARD_SLACK,
            max_shard_workers: defaults::DEFAULT_MAX_SHARD_WORKERS,
            timeout_ms: defaults::DEFAULT_VECTOR_TIMEOUT_MS,
        }
    }
}
