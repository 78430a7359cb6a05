//! Structured log events for key system operations.

/// A preferred backend failed and a degraded one answered instead.
pub fn fallback_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "fallback_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "fallback triggered"
    );
}

/// The lexical index was rebuilt.
pub fn index_rebuilt(documents: usize, vocabulary: usize, char_ngrams: bool, elapsed_ms: u128) {
    tracing::info!(
        event = "index_rebuilt",
        documents = documents,
        vocabulary = vocabulary,
        char_ngrams = char_ngrams,
        elapsed_ms = elapsed_ms as u64,
        "lexical index rebuilt"
    );
}

/// A vector shard failed or timed out and was skipped.
pub fn shard_failed(shard_index: usize, shard_count: usize, reason: &str) {
    tracing::warn!(
        event = "shard_failed",
        shard_index = shard_index,
        shard_count = shard_count,
        reason = %reason,
        "vector shard skipped"
    );
}

/// A re-estimation run finished.
pub fn reestimate_completed(scanned: usize, updated: usize, dry_run: bool) {
    tracing::info!(
        event = "reestimate_completed",
        scanned = scanned,
        updated = updated,
        dry_run = dry_run,
        "re-estimation completed"
    );
}

/// Embedding indexing progress.
pub fn indexing_progress(completed: usize, total: usize, provider: &str) {
    tracing::info!(
        event = "indexing_progress",
        completed = completed,
        total = total,
        provider = %provider,
        "embedding indexing progress"
    );
}
