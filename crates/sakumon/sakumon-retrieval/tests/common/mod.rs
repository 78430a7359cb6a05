//! Shared setup for retrieval integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sakumon_core::config::RetrievalConfig;
use sakumon_core::errors::{SakumonError, SakumonResult};
use sakumon_core::models::{Estimate, NewProblem, ProblemId};
use sakumon_core::traits::{IProblemStorage, IVectorStore, ShardPredicate};
use sakumon_retrieval::RetrievalEngine;
use sakumon_storage::StorageEngine;

pub fn estimate(difficulty: f64, trickiness: f64) -> Estimate {
    Estimate {
        difficulty,
        level: sakumon_core::models::level_for_difficulty(difficulty),
        trickiness,
    }
}

/// In-memory storage seeded with `(stem, difficulty)` pairs; ids 1..=n.
pub fn storage_with(problems: &[(&str, Option<f64>)]) -> Arc<StorageEngine> {
    let storage = StorageEngine::open_in_memory().unwrap();
    for (stem, difficulty) in problems {
        let est = difficulty.map(|d| estimate(d, 0.1));
        storage.insert(&NewProblem::new(*stem), est.as_ref()).unwrap();
    }
    Arc::new(storage)
}

/// In-memory storage holding the `math_ja` fixture corpus.
pub fn fixture_storage() -> Arc<StorageEngine> {
    let storage = StorageEngine::open_in_memory().unwrap();
    for p in test_fixtures::load_corpus("math_ja") {
        let mut problem = NewProblem::new(p.stem);
        if let Some(latex) = p.stem_latex {
            problem = problem.with_latex(latex);
        }
        if let Some(solution) = p.solution {
            problem = problem.with_solution(solution);
        }
        let est = p
            .difficulty
            .map(|d| estimate(d, p.trickiness.unwrap_or(0.0)));
        storage.insert(&problem, est.as_ref()).unwrap();
    }
    Arc::new(storage)
}

pub fn lexical_engine(storage: Arc<StorageEngine>) -> RetrievalEngine {
    let storage: Arc<dyn IProblemStorage> = storage;
    RetrievalEngine::new(storage, RetrievalConfig::default())
}

/// What a scripted shard returns.
#[derive(Clone)]
pub enum ShardScript {
    Hits(Vec<(ProblemId, f64)>),
    Fail,
    Sleep(Duration),
    Panic,
}

/// Vector store whose answer per shard index is scripted; unsharded calls
/// use shard 0's script.
pub struct ScriptedStore {
    pub dimensions: usize,
    pub scripts: Vec<ShardScript>,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedStore {
    pub fn new(dimensions: usize, scripts: Vec<ShardScript>) -> Self {
        Self {
            dimensions,
            scripts,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Most `nearest` calls observed running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn scripted(&self, index: usize, k: usize) -> SakumonResult<Vec<(ProblemId, f64)>> {
        match self.scripts.get(index).cloned().unwrap_or(ShardScript::Hits(Vec::new())) {
            ShardScript::Hits(mut hits) => {
                hits.truncate(k);
                Ok(hits)
            }
            ShardScript::Fail => Err(SakumonError::BackendUnavailable {
                backend: "scripted".into(),
                reason: format!("shard {index} down"),
            }),
            ShardScript::Sleep(d) => {
                std::thread::sleep(d);
                Ok(vec![(1, 0.0)])
            }
            ShardScript::Panic => panic!("shard {index} crashed"),
        }
    }
}

impl IVectorStore for ScriptedStore {
    fn nearest(
        &self,
        _vector: &[f32],
        k: usize,
        shard: Option<ShardPredicate>,
    ) -> SakumonResult<Vec<(ProblemId, f64)>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        let index = shard.map_or(0, |s| s.shard_index);
        let result = self.scripted(index, k);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn upsert(&self, _id: ProblemId, _vector: &[f32], _model_name: &str) -> SakumonResult<()> {
        Ok(())
    }

    fn embedded_ids(&self) -> SakumonResult<Vec<ProblemId>> {
        Ok(Vec::new())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Distance whose similarity `1 / (1 + d)` equals `similarity`.
pub fn distance_for(similarity: f64) -> f64 {
    1.0 / similarity - 1.0
}
