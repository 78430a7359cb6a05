//! Fills the vector store with problem embeddings.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use sakumon_core::errors::{EmbeddingError, SakumonResult};
use sakumon_core::traits::{IEmbeddingProvider, IProblemStorage, IVectorStore};
use sakumon_observability::tracing_setup::events;

/// Outcome of an indexing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
    pub total: usize,
    pub skipped: usize,
    pub embedded: usize,
}

/// Embeds every problem not yet embedded for the store's kind/version.
pub struct EmbeddingIndexer {
    provider: Arc<dyn IEmbeddingProvider>,
    store: Arc<dyn IVectorStore>,
    batch_size: usize,
}

impl EmbeddingIndexer {
    pub fn new(
        provider: Arc<dyn IEmbeddingProvider>,
        store: Arc<dyn IVectorStore>,
        batch_size: usize,
    ) -> Self {
        Self {
            provider,
            store,
            batch_size: batch_size.max(1),
        }
    }

    /// Embed missing problems in batches. Dimension disagreement between
    /// provider and store fails before anything is written.
    pub fn index(&self, storage: &dyn IProblemStorage) -> SakumonResult<IndexReport> {
        if self.provider.dimensions() != self.store.dimensions() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.store.dimensions(),
                actual: self.provider.dimensions(),
            }
            .into());
        }

        let existing: HashSet<_> = self.store.embedded_ids()?.into_iter().collect();
        let corpus = storage.load_corpus()?;
        let pending: Vec<_> = corpus
            .iter()
            .filter(|row| !existing.contains(&row.id))
            .collect();

        let mut report = IndexReport {
            total: corpus.len(),
            skipped: corpus.len() - pending.len(),
            embedded: 0,
        };

        for batch in pending.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|row| row.combined_text()).collect();
            let vectors = self.provider.embed_batch(&texts)?;
            if vectors.len() != batch.len() {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("{} vectors for {} texts", vectors.len(), batch.len()),
                }
                .into());
            }
            for (row, vector) in batch.iter().zip(vectors.iter()) {
                self.store.upsert(row.id, vector, self.provider.name())?;
                report.embedded += 1;
            }
            events::indexing_progress(report.embedded, pending.len(), self.provider.name());
        }

        Ok(report)
    }
}
