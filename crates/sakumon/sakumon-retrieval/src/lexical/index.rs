//! An immutable, fingerprinted lexical index.

use sakumon_core::models::{CorpusRow, Fingerprint, ProblemId};

use super::analyzer::Analyzer;
use super::model::{SparseVector, TfIdfModel};
use crate::normalize::normalize_math_text;

/// One build of the lexical index. Never mutated after construction; a
/// rebuild produces a new value.
#[derive(Debug, Clone)]
pub struct LexicalIndex {
    fingerprint: Fingerprint,
    ids: Vec<ProblemId>,
    model: TfIdfModel,
    matrix: Vec<SparseVector>,
}

impl LexicalIndex {
    /// Build from corpus rows in the order given (ascending id).
    pub fn build(fingerprint: Fingerprint, rows: &[CorpusRow]) -> Self {
        let texts: Vec<String> = rows
            .iter()
            .map(|r| normalize_math_text(&r.combined_text()))
            .collect();

        if texts.is_empty() {
            let (model, _) = TfIdfModel::fit(Analyzer::Word, &[String::new()]);
            return Self {
                fingerprint,
                ids: Vec::new(),
                model,
                matrix: Vec::new(),
            };
        }

        let analyzer = Analyzer::for_corpus(texts.iter().map(String::as_str));
        let (model, matrix) = TfIdfModel::fit(analyzer, &texts);
        Self {
            fingerprint,
            ids: rows.iter().map(|r| r.id).collect(),
            model,
            matrix,
        }
    }

    /// Cosine similarity of `query` against every document; only positive
    /// scores, best first, ties in id order, at most `top_k`.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<(ProblemId, f64)> {
        if self.ids.is_empty() || top_k == 0 {
            return Vec::new();
        }
        let q = self.model.transform(&normalize_math_text(query));
        if q.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(ProblemId, f64)> = self
            .ids
            .iter()
            .zip(&self.matrix)
            .map(|(&id, row)| (id, q.dot(row)))
            .filter(|(_, s)| *s > 0.0)
            .collect();
        // Stable: equal scores keep corpus order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);
        scored
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    pub fn ids(&self) -> &[ProblemId] {
        &self.ids
    }

    pub fn model(&self) -> &TfIdfModel {
        &self.model
    }

    pub fn matrix(&self) -> &[SparseVector] {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
