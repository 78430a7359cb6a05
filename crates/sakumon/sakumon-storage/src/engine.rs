//! StorageEngine: owns the connection pool and implements `IProblemStorage`.

use std::path::Path;

use rusqlite::Connection;

use sakumon_core::config::StorageConfig;
use sakumon_core::errors::SakumonResult;
use sakumon_core::models::{
    CorpusRow, Estimate, Fingerprint, NewProblem, Problem, ProblemAttributes, ProblemId,
};
use sakumon_core::traits::IProblemStorage;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{corpus, problem_crud};

/// SQLite-backed problem store.
///
/// File-backed engines read through the read pool; in-memory engines route
/// reads through the writer because separate in-memory connections do not
/// share a database.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a file-backed engine with default pool settings.
    pub fn open(path: &Path) -> SakumonResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> SakumonResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> SakumonResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> SakumonResult<()> {
        self.pool.writer.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Run a read-only query on the best available connection.
    pub fn with_reader<F, T>(&self, f: F) -> SakumonResult<T>
    where
        F: FnOnce(&Connection) -> SakumonResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }

    /// Run a statement on the write connection.
    pub fn with_writer<F, T>(&self, f: F) -> SakumonResult<T>
    where
        F: FnOnce(&Connection) -> SakumonResult<T>,
    {
        self.pool.writer.with_conn(f)
    }

    /// Raw `difficulty_details` JSON written by re-estimation.
    pub fn difficulty_details(&self, id: ProblemId) -> SakumonResult<Option<String>> {
        self.with_reader(|conn| problem_crud::get_difficulty_details(conn, id))
    }
}

impl IProblemStorage for StorageEngine {
    fn insert(&self, problem: &NewProblem, estimate: Option<&Estimate>) -> SakumonResult<ProblemId> {
        self.with_writer(|conn| problem_crud::insert_problem(conn, problem, estimate))
    }

    fn get(&self, id: ProblemId) -> SakumonResult<Option<Problem>> {
        self.with_reader(|conn| problem_crud::get_problem(conn, id))
    }

    fn fingerprint(&self) -> SakumonResult<Fingerprint> {
        self.with_reader(corpus::fingerprint)
    }

    fn load_corpus(&self) -> SakumonResult<Vec<CorpusRow>> {
        self.with_reader(corpus::load_corpus)
    }

    fn fetch_attributes(&self, ids: &[ProblemId]) -> SakumonResult<Vec<ProblemAttributes>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.with_reader(|conn| corpus::fetch_attributes(conn, ids))
    }

    fn list_for_estimation(&self, limit: Option<usize>) -> SakumonResult<Vec<Problem>> {
        self.with_reader(|conn| problem_crud::list_for_estimation(conn, limit))
    }

    fn update_estimate(
        &self,
        id: ProblemId,
        estimate: &Estimate,
        details_json: Option<&str>,
    ) -> SakumonResult<()> {
        self.with_writer(|conn| problem_crud::update_estimate(conn, id, estimate, details_json))
    }
}
