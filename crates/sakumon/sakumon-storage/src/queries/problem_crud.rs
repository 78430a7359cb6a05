//! Insert, get, list, and attribute updates for problems.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use sakumon_core::errors::{SakumonError, SakumonResult};
use sakumon_core::models::{Estimate, NewProblem, Problem, ProblemId};

use super::attributes::{read_level, read_numeric};
use crate::to_storage_err;

const PROBLEM_COLUMNS: &str = "id, stem, stem_latex, solution_text, difficulty, difficulty_level,
     trickiness, source, created_at, updated_at";

/// Insert a problem with optional precomputed attributes. Returns the new id.
pub fn insert_problem(
    conn: &Connection,
    problem: &NewProblem,
    estimate: Option<&Estimate>,
) -> SakumonResult<ProblemId> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO problems (
            stem, stem_latex, solution_text, difficulty, difficulty_level, trickiness,
            source, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
        params![
            problem.stem,
            problem.stem_latex,
            problem.solution_text,
            estimate.map(|e| e.difficulty),
            estimate.map(|e| e.level),
            estimate.map(|e| e.trickiness),
            problem.source,
            now,
        ],
    )
    .map_err(|e| to_storage_err(format!("insert_problem: {e}")))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_problem(conn: &Connection, id: ProblemId) -> SakumonResult<Option<Problem>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {PROBLEM_COLUMNS} FROM problems WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![id], |row| Ok(row_to_problem(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    result.transpose()
}

/// Problems in ascending id order, at most `limit` of them.
pub fn list_for_estimation(conn: &Connection, limit: Option<usize>) -> SakumonResult<Vec<Problem>> {
    let limit = limit.map_or(-1, |l| l as i64);
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {PROBLEM_COLUMNS} FROM problems ORDER BY id LIMIT ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit], |row| Ok(row_to_problem(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut problems = Vec::new();
    for row in rows {
        problems.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(problems)
}

/// Overwrite the estimated attributes of one problem.
pub fn update_estimate(
    conn: &Connection,
    id: ProblemId,
    estimate: &Estimate,
    details_json: Option<&str>,
) -> SakumonResult<()> {
    let changed = conn
        .execute(
            "UPDATE problems
             SET difficulty = ?2, difficulty_level = ?3, trickiness = ?4,
                 difficulty_details = COALESCE(?5, difficulty_details), updated_at = ?6
             WHERE id = ?1",
            params![
                id,
                estimate.difficulty,
                estimate.level,
                estimate.trickiness,
                details_json,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| to_storage_err(format!("update_estimate: {e}")))?;
    if changed == 0 {
        return Err(SakumonError::ProblemNotFound { id });
    }
    Ok(())
}

/// Stored verbose estimator output, if any.
pub fn get_difficulty_details(conn: &Connection, id: ProblemId) -> SakumonResult<Option<String>> {
    conn.query_row(
        "SELECT difficulty_details FROM problems WHERE id = ?1",
        params![id],
        |row| row.get::<_, Option<String>>(0),
    )
    .optional()
    .map(Option::flatten)
    .map_err(|e| to_storage_err(e.to_string()))
}

fn row_to_problem(row: &rusqlite::Row<'_>) -> SakumonResult<Problem> {
    let parse_dt = |s: &str| -> SakumonResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
    };
    let created_at: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;
    let updated_at: String = row.get(9).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(Problem {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        stem: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        stem_latex: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        solution_text: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        difficulty: read_numeric(row, 4),
        difficulty_level: read_level(row, 5),
        trickiness: read_numeric(row, 6),
        source: row.get(7).map_err(|e| to_storage_err(e.to_string()))?,
        created_at: parse_dt(&created_at)?,
        updated_at: parse_dt(&updated_at)?,
    })
}
