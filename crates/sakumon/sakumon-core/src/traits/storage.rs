use crate::errors::SakumonResult;
use crate::models::{
    CorpusRow, Estimate, Fingerprint, NewProblem, Problem, ProblemAttributes, ProblemId,
};

/// Persistence collaborator for problems and their estimated attributes.
pub trait IProblemStorage: Send + Sync {
    // --- CRUD ---
    /// Insert a problem, optionally with precomputed attributes. Returns the new id.
    fn insert(&self, problem: &NewProblem, estimate: Option<&Estimate>) -> SakumonResult<ProblemId>;
    fn get(&self, id: ProblemId) -> SakumonResult<Option<Problem>>;

    // --- Retrieval support ---
    /// `(count, sum(id), max(id))` over all problems in one aggregate query.
    fn fingerprint(&self) -> SakumonResult<Fingerprint>;
    /// Every problem as an index-build row, ordered by id.
    fn load_corpus(&self) -> SakumonResult<Vec<CorpusRow>>;
    /// Batched attribute lookup. Missing ids are simply absent from the result.
    fn fetch_attributes(&self, ids: &[ProblemId]) -> SakumonResult<Vec<ProblemAttributes>>;

    // --- Estimation ---
    fn list_for_estimation(&self, limit: Option<usize>) -> SakumonResult<Vec<Problem>>;
    fn update_estimate(
        &self,
        id: ProblemId,
        estimate: &Estimate,
        details_json: Option<&str>,
    ) -> SakumonResult<()>;
}
