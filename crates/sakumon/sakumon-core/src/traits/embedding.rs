use crate::errors::SakumonResult;

/// Embedding generation provider.
///
/// Treated as a black box: `embed(text) -> vector`. Implementations must
/// return vectors of exactly `dimensions()` floats.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    ///
    /// Callers run this inline on the request path with no deadline of their
    /// own. Implementations that do I/O must bound every call themselves and
    /// report an elapsed bound as `EmbeddingError::Timeout`.
    fn embed(&self, text: &str) -> SakumonResult<Vec<f32>>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[String]) -> SakumonResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
