use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary key of a stored problem.
pub type ProblemId = i64;

/// A persisted exam problem with its estimated attributes.
///
/// `difficulty_level` agrees with the estimator's buckets only while both
/// values come from the estimator; manual edits may make them diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    pub stem: String,
    /// Markup (LaTeX) rendition of the stem, when ingestion produced one.
    pub stem_latex: Option<String>,
    pub solution_text: Option<String>,
    pub difficulty: Option<f64>,
    pub difficulty_level: Option<u8>,
    pub trickiness: Option<f64>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    /// Text the estimator sees: stem followed by the solution, if any.
    pub fn estimation_text(&self) -> String {
        join_nonempty(&self.stem, self.solution_text.as_deref())
    }
}

/// Ingestion input for a new problem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProblem {
    pub stem: String,
    pub stem_latex: Option<String>,
    pub solution_text: Option<String>,
    pub source: Option<String>,
}

impl NewProblem {
    pub fn new(stem: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            ..Default::default()
        }
    }

    pub fn with_latex(mut self, latex: impl Into<String>) -> Self {
        self.stem_latex = Some(latex.into());
        self
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution_text = Some(solution.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Text the estimator sees at ingestion.
    pub fn estimation_text(&self) -> String {
        join_nonempty(&self.stem, self.solution_text.as_deref())
    }
}

/// Row used to build the lexical index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRow {
    pub id: ProblemId,
    pub stem: String,
    pub markup_text: Option<String>,
}

impl CorpusRow {
    /// Primary and secondary representation joined, so queries in either match.
    pub fn combined_text(&self) -> String {
        match self.markup_text.as_deref() {
            Some(markup) if !markup.is_empty() => format!("{} {}", self.stem, markup),
            _ => self.stem.clone(),
        }
    }
}

/// Attribute lookup row consumed by the ranker.
///
/// Values are normalized once at the persistence boundary: anything that is
/// not a finite number arrives here as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemAttributes {
    pub id: ProblemId,
    pub difficulty: Option<f64>,
    pub trickiness: Option<f64>,
    pub text: String,
}

/// Keep finite values only.
pub fn normalize_attribute(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Parse a textual attribute (e.g. after a manual edit stored a string).
pub fn parse_attribute(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().and_then(normalize_attribute)
}

fn join_nonempty(stem: &str, solution: Option<&str>) -> String {
    match solution {
        Some(s) if !s.trim().is_empty() => format!("{stem}\n{s}"),
        _ => stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_text_appends_markup() {
        let row = CorpusRow {
            id: 1,
            stem: "三角比".to_string(),
            markup_text: Some("\\sin x".to_string()),
        };
        assert_eq!(row.combined_text(), "三角比 \\sin x");
    }

    #[test]
    fn combined_text_without_markup_is_stem() {
        let row = CorpusRow {
            id: 1,
            stem: "stem".to_string(),
            markup_text: Some(String::new()),
        };
        assert_eq!(row.combined_text(), "stem");
    }

    #[test]
    fn parse_attribute_rejects_garbage() {
        assert_eq!(parse_attribute(" 0.25 "), Some(0.25));
        assert_eq!(parse_attribute("n/a"), None);
        assert_eq!(parse_attribute("NaN"), None);
        assert_eq!(parse_attribute("inf"), None);
    }

    #[test]
    fn estimation_text_skips_blank_solution() {
        let p = NewProblem::new("stem").with_solution("  ");
        assert_eq!(p.estimation_text(), "stem");
        let p = NewProblem::new("stem").with_solution("解答: 2");
        assert_eq!(p.estimation_text(), "stem\n解答: 2");
    }
}
