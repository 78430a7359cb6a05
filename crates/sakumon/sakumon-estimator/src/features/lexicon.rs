//! Keyword tables: domain concepts, trap phrases, diagram words.

use super::patterns::RE_WORD;

/// Concept keyword and how hard problems using it tend to be.
pub const CONCEPT_WEIGHTS: &[(&str, f64)] = &[
    ("積分", 0.9),
    ("微分", 0.8),
    ("行列", 0.85),
    ("確率", 0.9),
    ("証明", 0.95),
    ("図形", 0.7),
    ("数列", 0.75),
    ("方程式", 0.6),
];

/// Phrases that often introduce a condition the solver can overlook.
pub const TRAP_KEYWORDS: &[&str] = &["だが", "しかし", "ただし", "only", "ただ", "急に", "注意"];

pub const DIAGRAM_WORDS: &[&str] = &["図", "グラフ", "図形", "描け", "プロット", "diagram", "graph"];

/// Mean concept weight over every (word, keyword) containment hit; zero if none.
pub fn concept_density(text: &str) -> f64 {
    let Some(re) = RE_WORD.as_ref() else {
        return 0.0;
    };
    let mut hits = 0usize;
    let mut score = 0.0;
    for word in re.find_iter(text).map(|m| m.as_str()) {
        for (keyword, weight) in CONCEPT_WEIGHTS {
            if word.contains(keyword) {
                hits += 1;
                score += weight;
            }
        }
    }
    if hits == 0 {
        0.0
    } else {
        score / hits as f64
    }
}

/// Trap keyword occurrences, two or more saturating at 1.
pub fn trap_score(text: &str) -> f64 {
    let occurrences: usize = TRAP_KEYWORDS
        .iter()
        .map(|k| text.matches(k).count())
        .sum();
    (occurrences as f64 / 2.0).min(1.0)
}

pub fn has_diagram(text: &str) -> bool {
    let lowered = text.to_lowercase();
    DIAGRAM_WORDS.iter().any(|w| lowered.contains(w))
}
