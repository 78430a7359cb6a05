//! Ranked-list metrics with binary relevance.

use sakumon_core::models::ProblemId;

/// Fraction of the first `k` slots holding a relevant id. Slots beyond the
/// end of `retrieved` count as misses.
pub fn precision_at_k(retrieved: &[ProblemId], relevant: &[ProblemId], k: usize) -> f64 {
    if k == 0 || retrieved.is_empty() {
        return 0.0;
    }
    let hits = retrieved
        .iter()
        .take(k)
        .filter(|id| relevant.contains(id))
        .count();
    hits as f64 / k as f64
}

/// Reciprocal rank of the first relevant id, zero if none.
pub fn mrr(retrieved: &[ProblemId], relevant: &[ProblemId]) -> f64 {
    retrieved
        .iter()
        .position(|id| relevant.contains(id))
        .map_or(0.0, |i| 1.0 / (i + 1) as f64)
}

/// Rank 1 is undiscounted; rank i > 1 is divided by log2(i).
fn discount(rank: usize) -> f64 {
    if rank <= 1 {
        1.0
    } else {
        1.0 / (rank as f64).log2()
    }
}

pub fn dcg_at_k(retrieved: &[ProblemId], relevant: &[ProblemId], k: usize) -> f64 {
    retrieved
        .iter()
        .take(k)
        .enumerate()
        .filter(|(_, id)| relevant.contains(id))
        .map(|(i, _)| discount(i + 1))
        .sum()
}

/// DCG of the ideal ordering: every relevant id at the top.
pub fn idcg_at_k(relevant_count: usize, k: usize) -> f64 {
    (1..=relevant_count.min(k)).map(discount).sum()
}

pub fn ndcg_at_k(retrieved: &[ProblemId], relevant: &[ProblemId], k: usize) -> f64 {
    let ideal = idcg_at_k(relevant.len(), k);
    if ideal == 0.0 {
        return 0.0;
    }
    dcg_at_k(retrieved, relevant, k) / ideal
}
