//! Embedding providers and construction from config.

mod hashed_tfidf;
mod ollama_provider;

pub use hashed_tfidf::HashedTfIdfProvider;
pub use ollama_provider::{OllamaProvider, DEFAULT_OLLAMA_URL};

use sakumon_core::config::EmbeddingConfig;
use sakumon_core::errors::{SakumonError, SakumonResult};
use sakumon_core::traits::IEmbeddingProvider;

/// Build the provider named in config.
///
/// Remote providers are health-checked once here; an unreachable server
/// yields a provider that reports `is_available() == false`.
pub fn create_provider(config: &EmbeddingConfig) -> SakumonResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "hashed" | "tfidf" => Ok(Box::new(HashedTfIdfProvider::new(config.dimensions))),
        "ollama" => {
            let provider = OllamaProvider::new(
                config.model.clone(),
                config.dimensions,
                config.base_url.clone(),
                config.request_timeout_ms,
            );
            provider.health_check();
            Ok(Box::new(provider))
        }
        other => Err(SakumonError::Configuration {
            reason: format!("unknown embedding provider '{other}'"),
        }),
    }
}
