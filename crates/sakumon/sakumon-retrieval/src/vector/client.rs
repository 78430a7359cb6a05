//! Sharded nearest-neighbor search with a per-call deadline.
//!
//! With `shard_count > 1` the id space is partitioned by `id mod n`. Each
//! shard query is a blocking task holding its own handle to the store (and
//! therefore its own pooled connection). Collection stops at the deadline;
//! results arriving later are discarded.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, warn};

use sakumon_core::config::VectorConfig;
use sakumon_core::errors::{EmbeddingError, SakumonError, SakumonResult};
use sakumon_core::models::ProblemId;
use sakumon_core::traits::{IVectorStore, ShardPredicate};
use sakumon_observability::tracing_setup::events;

/// Floor on how many neighbors each shard is asked for.
pub const MIN_PER_SHARD_LIMIT: usize = 10;

type ShardResult = SakumonResult<Vec<(ProblemId, f64)>>;

pub struct VectorSimilarityClient {
    store: Arc<dyn IVectorStore>,
    config: VectorConfig,
}

impl VectorSimilarityClient {
    pub fn new(store: Arc<dyn IVectorStore>, config: VectorConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &VectorConfig {
        &self.config
    }

    pub fn dimensions(&self) -> usize {
        self.store.dimensions()
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// `(id, 1 / (1 + distance))` best first, at most `top_k`.
    ///
    /// Fails with a configuration error when the query dimension differs
    /// from the store's, and with `BackendUnavailable` when every shard
    /// failed or missed the deadline.
    pub fn search(
        &self,
        query: &[f32],
        top_k: usize,
        shard_count: usize,
    ) -> SakumonResult<Vec<(ProblemId, f64)>> {
        if query.len() != self.store.dimensions() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.store.dimensions(),
                actual: query.len(),
            }
            .into());
        }
        if shard_count == 0 {
            return Err(SakumonError::Configuration {
                reason: "vector shard_count must be at least 1".to_string(),
            });
        }
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let _span = sakumon_observability::vector_search_span!(top_k, shard_count).entered();

        let limit = if shard_count > 1 {
            per_shard_limit(top_k, shard_count, self.config.per_shard_slack)
        } else {
            top_k
        };

        let outcomes = self.run_shards(query, limit, shard_count)?;

        let mut best: HashMap<ProblemId, f64> = HashMap::new();
        let mut failures = Vec::new();
        let mut succeeded = 0usize;
        for (shard, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Some(Ok(hits)) => {
                    succeeded += 1;
                    for (id, distance) in hits {
                        let sim = similarity(distance);
                        best.entry(id)
                            .and_modify(|s| {
                                if sim > *s {
                                    *s = sim;
                                }
                            })
                            .or_insert(sim);
                    }
                }
                Some(Err(e)) if e.is_configuration() => return Err(e),
                Some(Err(e)) => {
                    let reason = e.to_string();
                    events::shard_failed(shard, shard_count, &reason);
                    failures.push(reason);
                }
                None => {
                    let reason = format!("no result within {}ms", self.config.timeout_ms);
                    events::shard_failed(shard, shard_count, &reason);
                    failures.push(reason);
                }
            }
        }

        if succeeded == 0 {
            return Err(SakumonError::BackendUnavailable {
                backend: self.store.name().to_string(),
                reason: failures.join("; "),
            });
        }

        let mut merged: Vec<(ProblemId, f64)> = best.into_iter().collect();
        merged.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        merged.truncate(top_k);
        debug!(
            results = merged.len(),
            shards_ok = succeeded,
            shards_failed = failures.len(),
            "vector search complete"
        );
        Ok(merged)
    }

    /// One slot per shard; `None` when the shard did not report in time.
    ///
    /// Shard queries run on the blocking pool of a call-scoped runtime, at
    /// most `max_shard_workers` at once. The runtime is shut down without
    /// waiting, so a shard still running at the deadline is abandoned.
    fn run_shards(
        &self,
        query: &[f32],
        limit: usize,
        shard_count: usize,
    ) -> SakumonResult<Vec<Option<ShardResult>>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .thread_name("sakumon-vector")
            .build()
            .map_err(|e| SakumonError::BackendUnavailable {
                backend: self.store.name().to_string(),
                reason: format!("runtime error: {e}"),
            })?;

        let query: Arc<[f32]> = Arc::from(query);
        let permits = Arc::new(Semaphore::new(self.config.max_shard_workers.max(1)));
        let deadline = Duration::from_millis(self.config.timeout_ms);
        let mut outcomes: Vec<Option<ShardResult>> = (0..shard_count).map(|_| None).collect();

        let completed = runtime.block_on(async {
            let mut tasks = JoinSet::new();
            for shard in 0..shard_count {
                let store = Arc::clone(&self.store);
                let query = Arc::clone(&query);
                let permits = Arc::clone(&permits);
                tasks.spawn(async move {
                    let Ok(_permit) = permits.acquire_owned().await else {
                        return (shard, Err(shard_task_error(store.name(), "worker pool closed")));
                    };
                    let name = store.name().to_string();
                    let predicate =
                        (shard_count > 1).then(|| ShardPredicate::new(shard_count, shard));
                    let result =
                        tokio::task::spawn_blocking(move || store.nearest(&query, limit, predicate))
                            .await
                            .unwrap_or_else(|e| Err(shard_task_error(&name, &e.to_string())));
                    (shard, result)
                });
            }

            timeout(deadline, async {
                while let Some(joined) = tasks.join_next().await {
                    match joined {
                        Ok((shard, result)) => outcomes[shard] = Some(result),
                        Err(e) => warn!(error = %e, "vector shard task aborted"),
                    }
                }
            })
            .await
            .is_ok()
        });
        runtime.shutdown_background();

        if !completed {
            debug!(timeout_ms = self.config.timeout_ms, "vector deadline reached");
        }
        Ok(outcomes)
    }
}

fn shard_task_error(backend: &str, reason: &str) -> SakumonError {
    SakumonError::BackendUnavailable {
        backend: backend.to_string(),
        reason: format!("shard task failed: {reason}"),
    }
}

/// Neighbors requested from each of `shard_count` shards.
pub fn per_shard_limit(top_k: usize, shard_count: usize, slack: usize) -> usize {
    (top_k / shard_count.max(1) + slack).max(MIN_PER_SHARD_LIMIT)
}

fn similarity(distance: f64) -> f64 {
    if distance.is_finite() {
        1.0 / (1.0 + distance.max(0.0))
    } else {
        0.0
    }
}
