//! RetrievalEngine: vector attempt → lexical fallback → attribute fetch → rank.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use sakumon_core::config::RetrievalConfig;
use sakumon_core::errors::{RetrievalError, SakumonError, SakumonResult};
use sakumon_core::models::{DegradationEvent, ProblemId, SearchBackend};
use sakumon_core::traits::{IEmbeddingProvider, IProblemStorage};
use sakumon_observability::tracing_setup::events;

use crate::lexical::{LexicalIndexCache, LexicalSearcher};
use crate::ranking::{Ranker, Targets};
use crate::request::{RetrievalRequest, RetrievalResponse};
use crate::vector::VectorSimilarityClient;

/// Outcome of trying the vector backend.
#[derive(Debug)]
pub enum VectorAttempt {
    Success(Vec<(ProblemId, f64)>),
    /// Embedding or vector store failed or timed out; lexical search may answer.
    Unavailable(SakumonError),
    /// Dimension mismatch or invalid vector config; surfaced to the caller.
    Misconfigured(SakumonError),
}

impl VectorAttempt {
    fn from_error(error: SakumonError) -> Self {
        if error.is_configuration() {
            VectorAttempt::Misconfigured(error)
        } else {
            VectorAttempt::Unavailable(error)
        }
    }
}

struct VectorBackend {
    embedder: Arc<dyn IEmbeddingProvider>,
    client: VectorSimilarityClient,
}

/// Hybrid retrieval over one problem store. Safe to share across threads;
/// the lexical index cache is the only state mutated by calls.
pub struct RetrievalEngine {
    storage: Arc<dyn IProblemStorage>,
    lexical: LexicalIndexCache,
    vector: Option<VectorBackend>,
    ranker: Ranker,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    /// Lexical-only engine. Add a vector backend with [`Self::with_vector`].
    pub fn new(storage: Arc<dyn IProblemStorage>, config: RetrievalConfig) -> Self {
        Self {
            storage,
            lexical: LexicalIndexCache::new(),
            vector: None,
            ranker: Ranker::new(config.ranker.clone()),
            config,
        }
    }

    pub fn with_vector(
        mut self,
        embedder: Arc<dyn IEmbeddingProvider>,
        client: VectorSimilarityClient,
    ) -> Self {
        self.vector = Some(VectorBackend { embedder, client });
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn lexical_cache(&self) -> &LexicalIndexCache {
        &self.lexical
    }

    pub fn has_vector_backend(&self) -> bool {
        self.vector.is_some()
    }

    /// Retrieve and rank problems for `request`.
    ///
    /// `Ok` with no results means nothing matched; an error means no backend
    /// could search, or the configuration is wrong.
    pub fn retrieve(&self, request: &RetrievalRequest) -> SakumonResult<RetrievalResponse> {
        let top_k = request.top_k.unwrap_or(self.config.top_k);
        let use_vector = request.use_vector.unwrap_or(self.config.use_vector);
        validate(request, top_k)?;

        let _span = sakumon_observability::retrieval_span!(top_k, use_vector).entered();

        let limit = top_k.saturating_mul(self.config.candidate_multiplier.max(1));
        let mut fallback = None;

        let (candidates, backend) = match self.vector.as_ref().filter(|_| use_vector) {
            Some(vector) => match attempt_vector(vector, &request.query, limit) {
                VectorAttempt::Success(hits) => (hits, SearchBackend::Vector),
                VectorAttempt::Unavailable(error) => {
                    fallback = Some(degrade(vector, &error.to_string()));
                    (self.lexical_candidates(request, limit)?, SearchBackend::Lexical)
                }
                VectorAttempt::Misconfigured(error) => return Err(error),
            },
            None => (
                self.lexical_candidates(request, limit)?,
                SearchBackend::Lexical,
            ),
        };

        if candidates.is_empty() {
            debug!(%backend, "no candidates found");
            return Ok(RetrievalResponse {
                fallback,
                ..RetrievalResponse::empty(backend)
            });
        }

        let ids: Vec<ProblemId> = candidates.iter().map(|(id, _)| *id).collect();
        let attributes = self.storage.fetch_attributes(&ids).map_err(search_failed)?;

        let results = self.ranker.rank(
            &request.query,
            &candidates,
            &attributes,
            Targets::new(request.target_difficulty, request.target_trickiness),
            request.weights.unwrap_or(self.config.weights),
            top_k,
        );

        info!(
            %backend,
            candidates = candidates.len(),
            results = results.len(),
            fell_back = fallback.is_some(),
            "retrieval complete"
        );

        Ok(RetrievalResponse {
            results,
            backend,
            candidates: candidates.len(),
            fallback,
        })
    }

    /// Raw lexical candidates, bypassing vector search and ranking.
    pub fn lexical_search(
        &self,
        query: &str,
        limit: usize,
        force_refresh: bool,
    ) -> SakumonResult<Vec<(ProblemId, f64)>> {
        LexicalSearcher::new(self.storage.as_ref(), &self.lexical).search(query, limit, force_refresh)
    }

    fn lexical_candidates(
        &self,
        request: &RetrievalRequest,
        limit: usize,
    ) -> SakumonResult<Vec<(ProblemId, f64)>> {
        self.lexical_search(&request.query, limit, request.force_lexical_refresh)
            .map_err(search_failed)
    }
}

fn attempt_vector(vector: &VectorBackend, query: &str, limit: usize) -> VectorAttempt {
    let embedding = match vector.embedder.embed(query) {
        Ok(embedding) => embedding,
        Err(e) => return VectorAttempt::from_error(e),
    };
    match vector
        .client
        .search(&embedding, limit, vector.client.config().shard_count)
    {
        Ok(hits) => VectorAttempt::Success(hits),
        Err(e) => VectorAttempt::from_error(e),
    }
}

fn degrade(vector: &VectorBackend, failure: &str) -> DegradationEvent {
    let component = format!("vector:{}", vector.client.store_name());
    events::fallback_triggered(&component, failure, "lexical");
    DegradationEvent {
        component,
        failure: failure.to_string(),
        fallback_used: "lexical".to_string(),
        timestamp: Utc::now(),
    }
}

fn validate(request: &RetrievalRequest, top_k: usize) -> SakumonResult<()> {
    if top_k == 0 {
        return Err(invalid("top_k must be at least 1"));
    }
    for (name, target) in [
        ("target_difficulty", request.target_difficulty),
        ("target_trickiness", request.target_trickiness),
    ] {
        if target.is_some_and(|t| !t.is_finite()) {
            return Err(invalid(&format!("{name} must be finite")));
        }
    }
    Ok(())
}

fn invalid(reason: &str) -> SakumonError {
    RetrievalError::InvalidRequest {
        reason: reason.to_string(),
    }
    .into()
}

/// Persistence failures on the lexical path mean nothing could search.
fn search_failed(error: SakumonError) -> SakumonError {
    if error.is_configuration() {
        return error;
    }
    RetrievalError::SearchFailed {
        reason: error.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_misconfigured() {
        let attempt = VectorAttempt::from_error(SakumonError::Configuration {
            reason: "dims".into(),
        });
        assert!(matches!(attempt, VectorAttempt::Misconfigured(_)));
    }

    #[test]
    fn backend_errors_are_unavailable() {
        let attempt = VectorAttempt::from_error(SakumonError::BackendUnavailable {
            backend: "sqlite".into(),
            reason: "timeout".into(),
        });
        assert!(matches!(attempt, VectorAttempt::Unavailable(_)));
    }

    #[test]
    fn validation_rejects_zero_top_k_and_nan_targets() {
        let request = RetrievalRequest::new("q");
        assert!(validate(&request, 0).is_err());
        let nan = RetrievalRequest::new("q").target_difficulty(f64::NAN);
        assert!(validate(&nan, 5).is_err());
        assert!(validate(&request, 5).is_ok());
    }
}
