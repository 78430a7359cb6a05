//! Corpus-wide reads used by retrieval: fingerprint, index rows, attributes.

use rusqlite::{params, params_from_iter, Connection};

use sakumon_core::constants::MAX_BULK_BATCH_SIZE;
use sakumon_core::errors::SakumonResult;
use sakumon_core::models::{CorpusRow, Fingerprint, ProblemAttributes, ProblemId};

use super::attributes::read_numeric;
use crate::to_storage_err;

/// `(count, sum(id), max(id))` in one aggregate query.
pub fn fingerprint(conn: &Connection) -> SakumonResult<Fingerprint> {
    conn.query_row(
        "SELECT count(*), coalesce(sum(id), 0), coalesce(max(id), 0) FROM problems",
        params![],
        |row| Ok(Fingerprint::new(row.get(0)?, row.get(1)?, row.get(2)?)),
    )
    .map_err(|e| to_storage_err(format!("fingerprint: {e}")))
}

/// Every problem as `(id, stem, stem_latex)`, ordered by id.
pub fn load_corpus(conn: &Connection) -> SakumonResult<Vec<CorpusRow>> {
    let mut stmt = conn
        .prepare("SELECT id, stem, stem_latex FROM problems ORDER BY id")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(CorpusRow {
                id: row.get(0)?,
                stem: row.get(1)?,
                markup_text: row.get(2)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Attributes for the given ids with one `IN (…)` query per batch.
pub fn fetch_attributes(
    conn: &Connection,
    ids: &[ProblemId],
) -> SakumonResult<Vec<ProblemAttributes>> {
    let mut out = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(MAX_BULK_BATCH_SIZE) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!(
            "SELECT id, difficulty, trickiness, stem FROM problems WHERE id IN ({placeholders})"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params_from_iter(chunk.iter()), |row| {
                Ok(ProblemAttributes {
                    id: row.get(0)?,
                    difficulty: read_numeric(row, 1),
                    trickiness: read_numeric(row, 2),
                    text: row.get(3)?,
                })
            })
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            out.push(row.map_err(|e| to_storage_err(e.to_string()))?);
        }
    }
    Ok(out)
}
