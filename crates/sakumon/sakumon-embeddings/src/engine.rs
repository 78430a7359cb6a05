//! EmbeddingEngine: provider + query cache + dimension validation.
//!
//! Implements `IEmbeddingProvider` so it can be handed to retrieval wherever
//! a provider is expected.

use tracing::{debug, info};

use sakumon_core::config::EmbeddingConfig;
use sakumon_core::errors::{EmbeddingError, SakumonResult};
use sakumon_core::traits::IEmbeddingProvider;

use crate::cache::{self, L1MemoryCache};
use crate::providers;

pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: L1MemoryCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Build the configured provider and fail fast when its dimension
    /// disagrees with the configured one.
    pub fn new(config: &EmbeddingConfig) -> SakumonResult<Self> {
        let provider = providers::create_provider(config)?;
        Self::with_provider(provider, config)
    }

    pub fn with_provider(
        provider: Box<dyn IEmbeddingProvider>,
        config: &EmbeddingConfig,
    ) -> SakumonResult<Self> {
        if provider.dimensions() != config.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: config.dimensions,
                actual: provider.dimensions(),
            }
            .into());
        }
        info!(
            provider = provider.name(),
            dims = config.dimensions,
            available = provider.is_available(),
            "embedding engine initialized"
        );
        Ok(Self {
            provider,
            cache: L1MemoryCache::new(config.l1_cache_size),
            dimensions: config.dimensions,
        })
    }

    /// Embed a query, served from the cache when the same text was seen.
    pub fn embed_query(&self, query: &str) -> SakumonResult<Vec<f32>> {
        let key = cache::text_key(query);
        if let Some(vec) = self.cache.get(&key) {
            debug!(key = %key, "query embedding cache hit");
            return Ok(vec);
        }
        let embedding = self.provider.embed(query)?;
        self.validate(&embedding)?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    /// Embed documents without caching; every vector is dimension-checked.
    pub fn embed_documents(&self, texts: &[String]) -> SakumonResult<Vec<Vec<f32>>> {
        let embeddings = self.provider.embed_batch(texts)?;
        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "provider returned {} vectors for {} texts",
                    embeddings.len(),
                    texts.len()
                ),
            }
            .into());
        }
        for embedding in &embeddings {
            self.validate(embedding)?;
        }
        Ok(embeddings)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    fn validate(&self, embedding: &[f32]) -> SakumonResult<()> {
        if embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> SakumonResult<Vec<f32>> {
        self.embed_query(text)
    }

    fn embed_batch(&self, texts: &[String]) -> SakumonResult<Vec<Vec<f32>>> {
        self.embed_documents(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}
