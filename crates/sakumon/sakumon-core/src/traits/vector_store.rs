use crate::errors::SakumonResult;
use crate::models::ProblemId;

/// Restricts a nearest-neighbor query to `problem_id % shard_count == shard_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardPredicate {
    pub shard_count: usize,
    pub shard_index: usize,
}

impl ShardPredicate {
    pub fn new(shard_count: usize, shard_index: usize) -> Self {
        Self {
            shard_count,
            shard_index,
        }
    }

    pub fn contains(&self, id: ProblemId) -> bool {
        self.shard_count > 0 && id.rem_euclid(self.shard_count as i64) == self.shard_index as i64
    }
}

/// Approximate nearest-neighbor store over problem embeddings.
///
/// `nearest` returns `(id, distance)` ascending by distance.
pub trait IVectorStore: Send + Sync {
    fn nearest(
        &self,
        vector: &[f32],
        k: usize,
        shard: Option<ShardPredicate>,
    ) -> SakumonResult<Vec<(ProblemId, f64)>>;

    fn upsert(&self, id: ProblemId, vector: &[f32], model_name: &str) -> SakumonResult<()>;

    /// Ids that already have an embedding for this store's kind/version.
    fn embedded_ids(&self) -> SakumonResult<Vec<ProblemId>>;

    /// Dimensionality the store was configured with.
    fn dimensions(&self) -> usize;

    fn name(&self) -> &str;
}
