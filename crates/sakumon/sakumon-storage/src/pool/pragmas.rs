//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use sakumon_core::errors::SakumonResult;

use crate::to_storage_err;

/// Apply write-side pragmas: WAL, NORMAL sync, busy timeout, foreign keys.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> SakumonResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply read-only pragmas to a read connection.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> SakumonResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA temp_store = MEMORY;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Whether WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> SakumonResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
