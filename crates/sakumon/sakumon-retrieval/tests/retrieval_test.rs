//! End-to-end retrieval over the SQLite collaborators.

mod common;

use std::sync::Arc;
use std::time::Duration;

use sakumon_core::config::{EmbeddingConfig, RankingWeights, RetrievalConfig, VectorConfig};
use sakumon_core::models::{NewProblem, SearchBackend};
use sakumon_core::traits::{IEmbeddingProvider, IProblemStorage, IVectorStore};
use sakumon_embeddings::{EmbeddingIndexer, HashedTfIdfProvider};
use sakumon_retrieval::{RetrievalEngine, RetrievalRequest, VectorSimilarityClient};
use sakumon_storage::{SqliteVectorStore, StorageEngine};

use common::{estimate, fixture_storage, lexical_engine, storage_with, ScriptedStore, ShardScript};

const DIMS: usize = 64;

fn hashed() -> Arc<dyn IEmbeddingProvider> {
    Arc::new(HashedTfIdfProvider::new(DIMS))
}

fn fast_vector_config() -> VectorConfig {
    VectorConfig {
        timeout_ms: 30,
        ..VectorConfig::default()
    }
}

#[test]
fn target_difficulty_prefers_matching_problem() {
    let storage = storage_with(&[
        ("二次関数の最小値を求めよ", Some(0.2)),
        ("三角比の基本", Some(0.8)),
    ]);
    let engine = lexical_engine(storage);

    let response = engine
        .retrieve(&RetrievalRequest::new("二次関数 最小値").target_difficulty(0.2))
        .unwrap();

    assert_eq!(response.backend, SearchBackend::Lexical);
    assert_eq!(response.results.first().map(|r| r.id), Some(1));
    assert_eq!(response.results[0].difficulty, Some(0.2));
}

#[test]
fn empty_corpus_returns_empty() {
    let engine = lexical_engine(Arc::new(StorageEngine::open_in_memory().unwrap()));
    let response = engine
        .retrieve(&RetrievalRequest::new("anything").target_difficulty(0.5))
        .unwrap();
    assert!(response.results.is_empty());
    assert_eq!(response.candidates, 0);
    assert!(!response.fell_back());
}

#[test]
fn vector_timeout_falls_back_to_lexical_result() {
    let storage = fixture_storage();
    let store = Arc::new(ScriptedStore::new(
        DIMS,
        vec![ShardScript::Sleep(Duration::from_millis(500))],
    ));
    let storage_dyn: Arc<dyn IProblemStorage> = storage.clone();
    let hybrid = RetrievalEngine::new(storage_dyn, RetrievalConfig::default())
        .with_vector(hashed(), VectorSimilarityClient::new(store, fast_vector_config()));
    let lexical = lexical_engine(storage);

    let request = RetrievalRequest::new("二次関数の最大値").top_k(5);
    let degraded = hybrid.retrieve(&request.clone().use_vector(true)).unwrap();
    let expected = lexical.retrieve(&request.use_vector(false)).unwrap();

    assert!(!degraded.results.is_empty());
    assert_eq!(degraded.backend, SearchBackend::Lexical);
    assert!(degraded.fell_back());
    assert_eq!(degraded.results, expected.results);
    let event = degraded.fallback.unwrap();
    assert_eq!(event.fallback_used, "lexical");
    assert!(event.component.contains("scripted"));
}

#[test]
fn failing_store_falls_back() {
    let storage = fixture_storage();
    let store = Arc::new(ScriptedStore::new(DIMS, vec![ShardScript::Fail]));
    let storage_dyn: Arc<dyn IProblemStorage> = storage;
    let engine = RetrievalEngine::new(storage_dyn, RetrievalConfig::default())
        .with_vector(hashed(), VectorSimilarityClient::new(store, fast_vector_config()));

    let response = engine.retrieve(&RetrievalRequest::new("ベクトルの内積")).unwrap();
    assert_eq!(response.backend, SearchBackend::Lexical);
    assert_eq!(response.results[0].id, 6);
}

#[test]
fn empty_vector_result_is_an_empty_answer() {
    let storage = fixture_storage();
    let store = Arc::new(ScriptedStore::new(DIMS, vec![ShardScript::Hits(Vec::new())]));
    let storage_dyn: Arc<dyn IProblemStorage> = storage;
    let engine = RetrievalEngine::new(storage_dyn, RetrievalConfig::default())
        .with_vector(hashed(), VectorSimilarityClient::new(store.clone(), fast_vector_config()));

    // Lexical search alone would match several fixture problems here.
    let response = engine
        .retrieve(&RetrievalRequest::new("二次関数").use_vector(true))
        .unwrap();
    assert_eq!(response.backend, SearchBackend::Vector);
    assert!(!response.fell_back());
    assert!(response.results.is_empty());
    assert_eq!(response.candidates, 0);
    assert_eq!(store.calls(), 1);
}

#[test]
fn dimension_mismatch_is_not_downgraded() {
    let storage = fixture_storage();
    let store = Arc::new(ScriptedStore::new(DIMS * 2, vec![ShardScript::Hits(vec![(1, 0.1)])]));
    let storage_dyn: Arc<dyn IProblemStorage> = storage;
    let engine = RetrievalEngine::new(storage_dyn, RetrievalConfig::default())
        .with_vector(hashed(), VectorSimilarityClient::new(store.clone(), fast_vector_config()));

    let err = engine
        .retrieve(&RetrievalRequest::new("二次関数"))
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(store.calls(), 0);
}

#[test]
fn use_vector_false_skips_vector_backend() {
    let storage = fixture_storage();
    let store = Arc::new(ScriptedStore::new(DIMS, vec![ShardScript::Fail]));
    let storage_dyn: Arc<dyn IProblemStorage> = storage;
    let engine = RetrievalEngine::new(storage_dyn, RetrievalConfig::default())
        .with_vector(hashed(), VectorSimilarityClient::new(store.clone(), fast_vector_config()));

    let response = engine
        .retrieve(&RetrievalRequest::new("確率").use_vector(false))
        .unwrap();
    assert!(!response.fell_back());
    assert_eq!(store.calls(), 0);
}

#[test]
fn indexed_sqlite_vectors_answer_exact_stem() {
    let storage = fixture_storage();
    let config = EmbeddingConfig {
        dimensions: DIMS,
        ..EmbeddingConfig::default()
    };
    let store: Arc<dyn IVectorStore> =
        Arc::new(SqliteVectorStore::from_config(storage.clone(), &config));
    let report = EmbeddingIndexer::new(hashed(), store.clone(), 4)
        .index(storage.as_ref())
        .unwrap();
    assert_eq!(report.embedded, 10);

    // No markup on problem 6, so its stored vector is the stem's vector.
    let stem = storage.get(6).unwrap().unwrap().stem;
    let storage_dyn: Arc<dyn IProblemStorage> = storage;
    let engine = RetrievalEngine::new(storage_dyn, RetrievalConfig::default()).with_vector(
        hashed(),
        VectorSimilarityClient::new(
            store,
            VectorConfig {
                shard_count: 3,
                ..VectorConfig::default()
            },
        ),
    );

    let response = engine.retrieve(&RetrievalRequest::new(stem).top_k(3)).unwrap();
    assert_eq!(response.backend, SearchBackend::Vector);
    assert_eq!(response.results[0].id, 6);
    assert!((response.results[0].text_score - 1.0).abs() < 1e-6);
}

#[test]
fn corpus_changes_rebuild_lexical_index_once() {
    let storage = storage_with(&[("alpha beta", Some(0.3)), ("gamma delta", Some(0.6))]);
    let storage_dyn: Arc<dyn IProblemStorage> = storage.clone();
    let engine = RetrievalEngine::new(storage_dyn, RetrievalConfig::default());
    let request = RetrievalRequest::new("alpha").use_vector(false);

    engine.retrieve(&request).unwrap();
    engine.retrieve(&request).unwrap();
    assert_eq!(engine.lexical_cache().build_count(), 1);

    // Attribute edits keep the id set, so the index stays.
    storage.update_estimate(1, &estimate(0.9, 0.9), None).unwrap();
    engine.retrieve(&request).unwrap();
    assert_eq!(engine.lexical_cache().build_count(), 1);

    storage.insert(&NewProblem::new("alpha epsilon"), None).unwrap();
    let response = engine.retrieve(&request).unwrap();
    assert_eq!(engine.lexical_cache().build_count(), 2);
    assert!(response.ids().contains(&3));
}

#[test]
fn deletion_changes_fingerprint_and_drops_result() {
    let storage = storage_with(&[("alpha one", None), ("alpha two", None), ("alpha three", None)]);
    let storage_dyn: Arc<dyn IProblemStorage> = storage.clone();
    let engine = RetrievalEngine::new(storage_dyn, RetrievalConfig::default());
    let request = RetrievalRequest::new("alpha").use_vector(false);

    assert_eq!(engine.retrieve(&request).unwrap().results.len(), 3);
    storage
        .with_writer(|conn| {
            conn.execute("DELETE FROM problems WHERE id = 2", [])
                .map(|_| ())
                .map_err(|e| sakumon_core::errors::SakumonError::Configuration {
                    reason: e.to_string(),
                })
        })
        .unwrap();
    let ids = engine.retrieve(&request).unwrap().ids();
    assert_eq!(engine.lexical_cache().build_count(), 2);
    assert!(!ids.contains(&2));
}

#[test]
fn forced_refresh_sees_in_place_text_edit() {
    let storage = storage_with(&[("alpha", None), ("beta", None)]);
    let storage_dyn: Arc<dyn IProblemStorage> = storage.clone();
    let engine = RetrievalEngine::new(storage_dyn, RetrievalConfig::default());
    let request = RetrievalRequest::new("gamma").use_vector(false);

    assert!(engine.retrieve(&request).unwrap().results.is_empty());
    storage
        .with_writer(|conn| {
            conn.execute("UPDATE problems SET stem = 'gamma' WHERE id = 2", [])
                .map(|_| ())
                .map_err(|e| sakumon_core::errors::SakumonError::Configuration {
                    reason: e.to_string(),
                })
        })
        .unwrap();
    // Same fingerprint: the stale index still answers.
    assert!(engine.retrieve(&request).unwrap().results.is_empty());
    let refreshed = engine.retrieve(&request.force_lexical_refresh()).unwrap();
    assert_eq!(refreshed.ids(), vec![2]);
}

#[test]
fn concurrent_readers_during_inserts() {
    let storage = fixture_storage();
    let storage_dyn: Arc<dyn IProblemStorage> = storage.clone();
    let engine = Arc::new(RetrievalEngine::new(storage_dyn, RetrievalConfig::default()));

    std::thread::scope(|s| {
        for t in 0..6 {
            let engine = Arc::clone(&engine);
            s.spawn(move || {
                for _ in 0..20 {
                    let response = engine
                        .retrieve(&RetrievalRequest::new("二次関数").top_k(3).use_vector(false))
                        .unwrap();
                    assert!(response.results.len() <= 3, "thread {t}");
                    assert!(!response.results.is_empty(), "thread {t}");
                }
            });
        }
        let storage = storage.clone();
        s.spawn(move || {
            for i in 0..10 {
                storage
                    .insert(&NewProblem::new(format!("二次関数の追加問題 {i}")), None)
                    .unwrap();
            }
        });
    });

    let response = engine
        .retrieve(&RetrievalRequest::new("追加問題").top_k(50).use_vector(false))
        .unwrap();
    for id in 11..=20 {
        assert!(response.ids().contains(&id), "missing {id}");
    }
    let index = engine.lexical_cache().current().unwrap().unwrap();
    assert_eq!(index.fingerprint(), storage.fingerprint().unwrap());
}

#[test]
fn request_weights_override_config() {
    let storage = storage_with(&[
        ("alpha beta gamma", Some(0.9)),
        ("alpha", Some(0.2)),
        ("delta", Some(0.2)),
    ]);
    let engine = lexical_engine(storage);
    let text_only = engine
        .retrieve(
            &RetrievalRequest::new("alpha beta gamma")
                .target_difficulty(0.2)
                .weights(RankingWeights::new(1.0, 0.0, 0.0)),
        )
        .unwrap();
    assert_eq!(text_only.results[0].id, 1);
}

#[test]
fn zero_top_k_is_invalid() {
    let engine = lexical_engine(fixture_storage());
    let err = engine.retrieve(&RetrievalRequest::new("x").top_k(0)).unwrap_err();
    assert!(matches!(
        err,
        sakumon_core::errors::SakumonError::Retrieval(
            sakumon_core::errors::RetrievalError::InvalidRequest { .. }
        )
    ));
}
