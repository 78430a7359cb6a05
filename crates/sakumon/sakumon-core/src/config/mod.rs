//! Configuration for every subsystem, loadable from TOML.
//!
//! Every section is `#[serde(default)]`, so an empty document yields a fully
//! populated config and partial documents override only what they name.

pub mod defaults;
mod embedding_config;
mod estimator_config;
mod observability_config;
mod retrieval_config;
mod storage_config;
mod vector_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use estimator_config::{EstimatorConfig, FeatureWeights, InteractionWeights, TrickinessWeights};
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::{RankerConfig, RankingWeights, RetrievalConfig};
pub use storage_config::StorageConfig;
pub use vector_config::VectorConfig;

use crate::errors::{SakumonError, SakumonResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SakumonConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub vector: VectorConfig,
    pub retrieval: RetrievalConfig,
    pub estimator: EstimatorConfig,
    pub observability: ObservabilityConfig,
}

impl SakumonConfig {
    /// Parse a TOML document.
    pub fn from_toml(source: &str) -> SakumonResult<Self> {
        toml::from_str(source).map_err(|e| SakumonError::Configuration {
            reason: format!("invalid TOML: {e}"),
        })
    }

    /// Read and parse a TOML file, then validate it.
    pub fn from_file(path: &Path) -> SakumonResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| SakumonError::Configuration {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        let config = Self::from_toml(&source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would only fail later at call time.
    pub fn validate(&self) -> SakumonResult<()> {
        if self.storage.db_path.trim().is_empty() {
            return Err(SakumonError::Configuration {
                reason: "storage.db_path is required".to_string(),
            });
        }
        if self.embedding.dimensions == 0 {
            return Err(SakumonError::Configuration {
                reason: "embedding.dimensions must be positive".to_string(),
            });
        }
        if self.vector.shard_count == 0 {
            return Err(SakumonError::Configuration {
                reason: "vector.shard_count must be at least 1".to_string(),
            });
        }
        if self.retrieval.candidate_multiplier == 0 {
            return Err(SakumonError::Configuration {
                reason: "retrieval.candidate_multiplier must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
