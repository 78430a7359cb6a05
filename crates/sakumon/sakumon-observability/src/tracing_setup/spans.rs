//! Span definitions per operation: retrieval, estimation, index build, vector search.

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($top_k:expr, $use_vector:expr) => {
        tracing::info_span!("sakumon.retrieval", top_k = $top_k, use_vector = $use_vector)
    };
}

/// Create an estimation span.
#[macro_export]
macro_rules! estimation_span {
    ($text_chars:expr) => {
        tracing::debug_span!("sakumon.estimation", text_chars = $text_chars)
    };
}

/// Create a lexical index build span.
#[macro_export]
macro_rules! index_build_span {
    ($fingerprint:expr) => {
        tracing::info_span!("sakumon.index_build", fingerprint = %$fingerprint)
    };
}

/// Create a vector search span.
#[macro_export]
macro_rules! vector_search_span {
    ($top_k:expr, $shard_count:expr) => {
        tracing::info_span!("sakumon.vector_search", top_k = $top_k, shard_count = $shard_count)
    };
}
