//! v002: problem_embeddings, one row per (problem, kind, version).

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS problem_embeddings (
    problem_id         INTEGER NOT NULL,
    kind               TEXT NOT NULL,
    embedding_version  TEXT NOT NULL,
    embedding          BLOB NOT NULL,
    dimensions         INTEGER NOT NULL,
    model_name         TEXT NOT NULL DEFAULT 'unknown',
    created_at         TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    PRIMARY KEY (problem_id, kind, embedding_version),
    FOREIGN KEY (problem_id) REFERENCES problems(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_problem_embeddings_kind
    ON problem_embeddings(kind, embedding_version);
";
