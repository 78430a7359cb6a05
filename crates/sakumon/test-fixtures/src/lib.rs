//! Test fixture loader for sakumon corpora and evaluation sets.
//!
//! Provides typed deserialization of the fixture JSON files and helpers for
//! loading them in tests across crates.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("corpus").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// One problem of a fixture corpus. Ids are assigned by insertion order,
/// starting at 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureProblem {
    pub stem: String,
    #[serde(default)]
    pub stem_latex: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// Stored difficulty; `None` leaves the column NULL.
    #[serde(default)]
    pub difficulty: Option<f64>,
    #[serde(default)]
    pub trickiness: Option<f64>,
}

/// A labelled retrieval query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureQuery {
    pub query: String,
    pub relevant_ids: Vec<i64>,
    #[serde(default)]
    pub target_difficulty: Option<f64>,
}

/// Load `corpus/<name>.json`.
pub fn load_corpus(name: &str) -> Vec<FixtureProblem> {
    load_fixture(&format!("corpus/{name}.json"))
}

/// Load `eval/<name>.json`.
pub fn load_eval_set(name: &str) -> Vec<FixtureQuery> {
    load_fixture(&format!("eval/{name}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_corpus_loads() {
        let corpus = load_corpus("math_ja");
        assert!(corpus.len() >= 8);
        assert!(corpus.iter().all(|p| !p.stem.is_empty()));
    }

    #[test]
    fn eval_ids_point_into_corpus() {
        let corpus = load_corpus("math_ja");
        for q in load_eval_set("math_ja") {
            assert!(!q.relevant_ids.is_empty());
            for id in q.relevant_ids {
                assert!(id >= 1 && (id as usize) <= corpus.len(), "bad id {id}");
            }
        }
    }

    #[test]
    fn missing_fixture_is_reported() {
        assert!(!fixture_exists("corpus/does_not_exist.json"));
        assert!(fixture_path("corpus/math_ja.json").exists());
    }
}
