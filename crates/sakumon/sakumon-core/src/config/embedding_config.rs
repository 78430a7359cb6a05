use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "hashed" or "ollama".
    pub provider: String,
    /// Model name passed to remote providers.
    pub model: String,
    /// Base URL for HTTP providers. `None` uses the provider default.
    pub base_url: Option<String>,
    /// Embedding dimensions. Must equal the vector store dimension.
    pub dimensions: usize,
    /// Batch size for indexing.
    pub batch_size: usize,
    /// L1 in-memory query cache max entries.
    pub l1_cache_size: u64,
    /// Per-request timeout for remote providers (milliseconds).
    pub request_timeout_ms: u64,
    /// Embedding kind stored alongside vectors.
    pub kind: String,
    /// Embedding version tag; re-indexing with a new tag re-embeds everything.
    pub version: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: None,
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            request_timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
            kind: crate::constants::STEM_EMBEDDING_KIND.to_string(),
            version: defaults::DEFAULT_EMBEDDING_VERSION.to_string(),
        }
    }
}
