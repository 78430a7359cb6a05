//! Versioned schema migrations tracked in `PRAGMA user_version`.

mod v001_problems;
mod v002_problem_embeddings;

use rusqlite::Connection;

use sakumon_core::errors::{SakumonResult, StorageError};

/// Latest schema version.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the database's current version.
pub fn run_migrations(conn: &Connection) -> SakumonResult<u32> {
    let current_version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::MigrationFailed {
            version: 0,
            reason: e.to_string(),
        })?;

    let migrations: &[(&str, u32)] = &[
        (v001_problems::MIGRATION_SQL, 1),
        (v002_problem_embeddings::MIGRATION_SQL, 2),
    ];

    let mut applied = 0;
    for (sql, version) in migrations {
        if current_version < *version {
            conn.execute_batch(sql)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            applied += 1;
        }
    }

    if applied > 0 {
        tracing::info!(from = current_version, to = LATEST_VERSION, "schema migrated");
    }
    Ok(applied)
}
