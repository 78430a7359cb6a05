//! Lexical search over the persistence collaborator.

use tracing::debug;

use sakumon_core::errors::SakumonResult;
use sakumon_core::models::ProblemId;
use sakumon_core::traits::IProblemStorage;

use super::cache::LexicalIndexCache;

/// Reads the live fingerprint, reuses or rebuilds the cached index, and
/// searches it.
pub struct LexicalSearcher<'a> {
    storage: &'a dyn IProblemStorage,
    cache: &'a LexicalIndexCache,
}

impl<'a> LexicalSearcher<'a> {
    pub fn new(storage: &'a dyn IProblemStorage, cache: &'a LexicalIndexCache) -> Self {
        Self { storage, cache }
    }

    pub fn search(
        &self,
        query: &str,
        top_k: usize,
        force_refresh: bool,
    ) -> SakumonResult<Vec<(ProblemId, f64)>> {
        let fingerprint = self.storage.fingerprint()?;
        let index = self
            .cache
            .get_or_build(fingerprint, || self.storage.load_corpus(), force_refresh)?;
        let hits = index.search(query, top_k);
        debug!(
            hits = hits.len(),
            documents = index.len(),
            fingerprint = %fingerprint,
            "lexical search complete"
        );
        Ok(hits)
    }
}
