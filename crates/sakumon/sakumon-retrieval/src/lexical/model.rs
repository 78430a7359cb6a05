//! TF-IDF weighting over a fitted vocabulary.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::analyzer::Analyzer;

/// Sparse row: `(term index, weight)` sorted by term index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(mut counts: HashMap<usize, f64>, idf: &[f64]) -> Self {
        let mut entries: Vec<(usize, f64)> = counts
            .drain()
            .map(|(term, tf)| (term, tf * idf[term]))
            .collect();
        entries.sort_unstable_by_key(|(term, _)| *term);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Dot product by merging the two sorted index lists. Rows are
    /// L2-normalized, so this is the cosine.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Fitted vocabulary, smoothed idf and the analyzer that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfModel {
    analyzer: Analyzer,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfModel {
    /// Fit on `documents` and return the model with one row per document.
    ///
    /// idf is `ln((1 + n) / (1 + df)) + 1`; rows hold raw term counts times
    /// idf, L2-normalized.
    pub fn fit(analyzer: Analyzer, documents: &[String]) -> (Self, Vec<SparseVector>) {
        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| analyzer.analyze(d)).collect();

        // Sorted terms give a stable column layout across rebuilds.
        let terms: BTreeSet<&str> = analyzed.iter().flatten().map(String::as_str).collect();
        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        for doc in &analyzed {
            let unique: BTreeSet<usize> = doc.iter().filter_map(|t| vocabulary.get(t).copied()).collect();
            for term in unique {
                df[term] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let model = Self {
            analyzer,
            vocabulary,
            idf,
        };
        let rows = analyzed.iter().map(|doc| model.vectorize(doc)).collect();
        (model, rows)
    }

    /// Project a query into the fitted space. Unknown terms are dropped.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.vectorize(&self.analyzer.analyze(text))
    }

    fn vectorize(&self, terms: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        SparseVector::from_counts(counts, &self.idf)
    }

    pub fn analyzer(&self) -> Analyzer {
        self.analyzer
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn rows_are_unit_length() {
        let (_, rows) = TfIdfModel::fit(Analyzer::Word, &docs(&["alpha beta", "beta gamma gamma"]));
        for row in &rows {
            assert!((row.dot(row) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn shared_terms_weigh_less() {
        let (model, _) = TfIdfModel::fit(Analyzer::Word, &docs(&["alpha beta", "beta gamma"]));
        let beta = model.vocabulary["beta"];
        let alpha = model.vocabulary["alpha"];
        assert!(model.idf[beta] < model.idf[alpha]);
        // beta occurs in every document: ln(3/3) + 1
        assert!((model.idf[beta] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_query_terms_give_empty_vector() {
        let (model, _) = TfIdfModel::fit(Analyzer::Word, &docs(&["alpha beta"]));
        assert!(model.transform("zeta eta").is_empty());
    }

    #[test]
    fn empty_placeholder_fits() {
        let (model, rows) = TfIdfModel::fit(Analyzer::Word, &docs(&[""]));
        assert_eq!(model.vocabulary_size(), 0);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_empty());
    }

    #[test]
    fn identical_documents_have_cosine_one() {
        let (model, rows) = TfIdfModel::fit(Analyzer::Word, &docs(&["minimum of quadratic", "sine rule"]));
        let q = model.transform("minimum of quadratic");
        assert!((q.dot(&rows[0]) - 1.0).abs() < 1e-12);
        assert_eq!(q.dot(&rows[1]), 0.0);
    }
}
