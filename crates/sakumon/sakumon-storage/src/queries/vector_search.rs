//! Brute-force nearest-neighbor search over stored embeddings.
//!
//! Distances are Euclidean, matching an L2 operator in a dedicated vector
//! database. The shard predicate is pushed into SQL with a non-negative
//! remainder so it agrees with `ShardPredicate::contains` for every id.

use rusqlite::{params, Connection};

use sakumon_core::errors::SakumonResult;
use sakumon_core::models::ProblemId;
use sakumon_core::traits::ShardPredicate;

use crate::to_storage_err;

/// Store or replace the embedding of one problem for a kind/version.
pub fn upsert_embedding(
    conn: &Connection,
    problem_id: ProblemId,
    kind: &str,
    version: &str,
    embedding: &[f32],
    model_name: &str,
) -> SakumonResult<()> {
    conn.execute(
        "INSERT INTO problem_embeddings
            (problem_id, kind, embedding_version, embedding, dimensions, model_name)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(problem_id, kind, embedding_version) DO UPDATE SET
            embedding = excluded.embedding,
            dimensions = excluded.dimensions,
            model_name = excluded.model_name",
        params![
            problem_id,
            kind,
            version,
            f32_vec_to_bytes(embedding),
            embedding.len() as i64,
            model_name,
        ],
    )
    .map_err(|e| to_storage_err(format!("upsert_embedding: {e}")))?;
    Ok(())
}

/// Ids that have an embedding for the kind/version.
pub fn embedded_ids(conn: &Connection, kind: &str, version: &str) -> SakumonResult<Vec<ProblemId>> {
    let mut stmt = conn
        .prepare(
            "SELECT problem_id FROM problem_embeddings
             WHERE kind = ?1 AND embedding_version = ?2 ORDER BY problem_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![kind, version], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// The `k` nearest stored embeddings as `(id, distance)` ascending.
///
/// Stored vectors whose dimension differs from the query are skipped.
pub fn nearest(
    conn: &Connection,
    kind: &str,
    version: &str,
    query: &[f32],
    k: usize,
    shard: Option<ShardPredicate>,
) -> SakumonResult<Vec<(ProblemId, f64)>> {
    let (shard_count, shard_index) = match shard {
        Some(s) => (s.shard_count as i64, s.shard_index as i64),
        None => (1, 0),
    };
    let mut stmt = conn
        .prepare(
            "SELECT problem_id, embedding, dimensions FROM problem_embeddings
             WHERE kind = ?1 AND embedding_version = ?2 AND ((problem_id % ?3) + ?3) % ?3 = ?4",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![kind, version, shard_count, shard_index], |row| {
            let id: ProblemId = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let dims: i64 = row.get(2)?;
            Ok((id, blob, dims))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored: Vec<(ProblemId, f64)> = Vec::new();
    for row in rows {
        let (id, blob, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims as usize != query.len() {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob);
        scored.push((id, euclidean_distance(query, &stored)));
    }

    scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    scored.truncate(k);
    Ok(scored)
}

fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn euclidean_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}
