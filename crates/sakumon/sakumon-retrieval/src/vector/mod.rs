//! Client side of the external nearest-neighbor store.

pub mod client;

pub use client::{per_shard_limit, VectorSimilarityClient, MIN_PER_SHARD_LIMIT};
