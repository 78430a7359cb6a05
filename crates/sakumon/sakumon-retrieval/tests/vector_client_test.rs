//! Sharded vector search: merging, partial failure, deadlines.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use sakumon_core::config::VectorConfig;
use sakumon_retrieval::VectorSimilarityClient;

use common::{distance_for, ScriptedStore, ShardScript};

const DIMS: usize = 4;

fn client(scripts: Vec<ShardScript>, config: VectorConfig) -> (Arc<ScriptedStore>, VectorSimilarityClient) {
    let store = Arc::new(ScriptedStore::new(DIMS, scripts));
    (store.clone(), VectorSimilarityClient::new(store, config))
}

fn sharded(shard_count: usize) -> VectorConfig {
    VectorConfig {
        shard_count,
        timeout_ms: 200,
        ..VectorConfig::default()
    }
}

#[test]
fn merge_keeps_best_similarity_per_id() {
    let (_, client) = client(
        vec![
            ShardScript::Hits(vec![(7, distance_for(0.6)), (4, distance_for(0.5))]),
            ShardScript::Hits(vec![(7, distance_for(0.9))]),
            ShardScript::Hits(Vec::new()),
            ShardScript::Hits(vec![(3, distance_for(0.7))]),
        ],
        sharded(4),
    );

    let hits = client.search(&[0.0; DIMS], 10, 4).unwrap();
    let ids: Vec<_> = hits.iter().map(|h| h.0).collect();
    assert_eq!(ids, vec![7, 3, 4]);
    assert!((hits[0].1 - 0.9).abs() < 1e-9);
}

#[test]
fn failed_shard_is_skipped() {
    let (store, client) = client(
        vec![
            ShardScript::Hits(vec![(4, distance_for(0.8))]),
            ShardScript::Fail,
            ShardScript::Hits(vec![(2, distance_for(0.4))]),
        ],
        sharded(3),
    );
    let hits = client.search(&[0.0; DIMS], 5, 3).unwrap();
    assert_eq!(hits.iter().map(|h| h.0).collect::<Vec<_>>(), vec![4, 2]);
    assert_eq!(store.calls(), 3);
}

#[test]
fn all_shards_failing_is_backend_unavailable() {
    let (_, client) = client(vec![ShardScript::Fail, ShardScript::Fail], sharded(2));
    let err = client.search(&[0.0; DIMS], 5, 2).unwrap_err();
    assert!(err.is_backend_unavailable());
    assert!(!err.is_configuration());
}

#[test]
fn slow_shard_misses_deadline() {
    let (_, client) = client(
        vec![
            ShardScript::Hits(vec![(2, distance_for(0.5))]),
            ShardScript::Sleep(Duration::from_secs(2)),
        ],
        VectorConfig {
            shard_count: 2,
            timeout_ms: 100,
            ..VectorConfig::default()
        },
    );
    let started = Instant::now();
    let hits = client.search(&[0.0; DIMS], 5, 2).unwrap();
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(hits, vec![(2, 0.5)]);
}

#[test]
fn unsharded_timeout_fails() {
    let (_, client) = client(
        vec![ShardScript::Sleep(Duration::from_secs(2))],
        VectorConfig {
            timeout_ms: 50,
            ..VectorConfig::default()
        },
    );
    let err = client.search(&[0.0; DIMS], 5, 1).unwrap_err();
    assert!(err.is_backend_unavailable());
}

#[test]
fn worker_cap_still_covers_every_shard() {
    let scripts = (0..6)
        .map(|i| ShardScript::Hits(vec![(i as i64 + 1, distance_for(0.5))]))
        .collect();
    let (store, client) = client(
        scripts,
        VectorConfig {
            shard_count: 6,
            max_shard_workers: 2,
            timeout_ms: 500,
            ..VectorConfig::default()
        },
    );
    let hits = client.search(&[0.0; DIMS], 10, 6).unwrap();
    assert_eq!(hits.len(), 6);
    assert_eq!(store.calls(), 6);
    // Equal similarity: ascending id.
    assert_eq!(hits.iter().map(|h| h.0).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn worker_cap_bounds_concurrent_shard_queries() {
    let scripts = (0..6).map(|_| ShardScript::Sleep(Duration::from_millis(40))).collect();
    let (store, client) = client(
        scripts,
        VectorConfig {
            shard_count: 6,
            max_shard_workers: 2,
            timeout_ms: 5_000,
            ..VectorConfig::default()
        },
    );
    let hits = client.search(&[0.0; DIMS], 10, 6).unwrap();
    assert_eq!(hits, vec![(1, 1.0)]);
    assert_eq!(store.calls(), 6);
    assert!(store.peak_in_flight() <= 2, "peak {}", store.peak_in_flight());
}

#[test]
fn panicking_shard_counts_as_failed() {
    let (_, client) = client(
        vec![ShardScript::Panic, ShardScript::Hits(vec![(5, distance_for(0.8))])],
        sharded(2),
    );
    let hits = client.search(&[0.0; DIMS], 5, 2).unwrap();
    assert_eq!(hits.iter().map(|h| h.0).collect::<Vec<_>>(), vec![5]);
}

#[test]
fn wrong_query_dimension_is_configuration_error() {
    let (store, client) = client(vec![ShardScript::Hits(vec![(1, 0.0)])], sharded(1));
    let err = client.search(&[0.0; DIMS + 1], 5, 1).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(store.calls(), 0);
}

#[test]
fn zero_shards_is_configuration_error() {
    let (_, client) = client(Vec::new(), sharded(1));
    assert!(client.search(&[0.0; DIMS], 5, 0).unwrap_err().is_configuration());
}

#[test]
fn results_truncate_to_top_k() {
    let hits = (1..=30).map(|id| (id, id as f64)).collect();
    let (_, client) = client(vec![ShardScript::Hits(hits)], sharded(1));
    let result = client.search(&[0.0; DIMS], 5, 1).unwrap();
    assert_eq!(result.len(), 5);
    assert_eq!(result[0].0, 1);
}
