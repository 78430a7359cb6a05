//! `IVectorStore` over the `problem_embeddings` table.

use std::sync::Arc;

use sakumon_core::config::EmbeddingConfig;
use sakumon_core::errors::{EmbeddingError, SakumonResult};
use sakumon_core::models::ProblemId;
use sakumon_core::traits::{IVectorStore, ShardPredicate};

use crate::engine::StorageEngine;
use crate::queries::vector_search;

/// Brute-force vector store scoped to one embedding kind and version.
///
/// Every call takes its own pooled read connection, so concurrent shard
/// queries do not share a connection.
pub struct SqliteVectorStore {
    engine: Arc<StorageEngine>,
    kind: String,
    version: String,
    dimensions: usize,
}

impl SqliteVectorStore {
    pub fn new(
        engine: Arc<StorageEngine>,
        kind: impl Into<String>,
        version: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self {
            engine,
            kind: kind.into(),
            version: version.into(),
            dimensions,
        }
    }

    pub fn from_config(engine: Arc<StorageEngine>, config: &EmbeddingConfig) -> Self {
        Self::new(engine, &config.kind, &config.version, config.dimensions)
    }

    fn check_dimensions(&self, vector: &[f32]) -> SakumonResult<()> {
        if vector.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl IVectorStore for SqliteVectorStore {
    fn nearest(
        &self,
        vector: &[f32],
        k: usize,
        shard: Option<ShardPredicate>,
    ) -> SakumonResult<Vec<(ProblemId, f64)>> {
        self.check_dimensions(vector)?;
        self.engine.with_reader(|conn| {
            vector_search::nearest(conn, &self.kind, &self.version, vector, k, shard)
        })
    }

    fn upsert(&self, id: ProblemId, vector: &[f32], model_name: &str) -> SakumonResult<()> {
        self.check_dimensions(vector)?;
        self.engine.with_writer(|conn| {
            vector_search::upsert_embedding(conn, id, &self.kind, &self.version, vector, model_name)
        })
    }

    fn embedded_ids(&self) -> SakumonResult<Vec<ProblemId>> {
        self.engine
            .with_reader(|conn| vector_search::embedded_ids(conn, &self.kind, &self.version))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
