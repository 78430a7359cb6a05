//! v001: problems table.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS problems (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    stem                TEXT NOT NULL,
    stem_latex          TEXT,
    solution_text       TEXT,
    difficulty          REAL,
    difficulty_level    INTEGER,
    trickiness          REAL,
    difficulty_details  TEXT,
    source              TEXT,
    created_at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_problems_level ON problems(difficulty_level);
";
