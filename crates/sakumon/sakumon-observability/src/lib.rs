//! # sakumon-observability
//!
//! Structured tracing for the retrieval and estimation pipelines: subscriber
//! setup, span macros per operation, and structured events for fallbacks,
//! index rebuilds, and re-estimation runs.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_from_config};
