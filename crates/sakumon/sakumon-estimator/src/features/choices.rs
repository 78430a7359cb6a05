//! Multiple-choice option extraction and option similarity.

use std::collections::HashSet;

use super::patterns::{RE_INLINE_OPTION, RE_LINE_OPTION, RE_WORD};

/// Options in `(A) …` inline form if any, otherwise `A.` / `A)` / `A:` / `A：`
/// at line start.
pub fn extract_options(text: &str) -> Vec<String> {
    if let Some(re) = RE_INLINE_OPTION.as_ref() {
        let inline: Vec<String> = re
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect();
        if !inline.is_empty() {
            return inline;
        }
    }
    let Some(re) = RE_LINE_OPTION.as_ref() else {
        return Vec::new();
    };
    text.lines()
        .filter_map(|line| re.captures(line))
        .filter_map(|c| c.get(2))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Mean pairwise token-Jaccard similarity. Zero with fewer than two options.
pub fn option_similarity(options: &[String]) -> f64 {
    if options.len() < 2 {
        return 0.0;
    }
    let token_sets: Vec<HashSet<String>> = options.iter().map(|o| option_tokens(o)).collect();
    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..token_sets.len() {
        for j in (i + 1)..token_sets.len() {
            total += jaccard(&token_sets[i], &token_sets[j]);
            pairs += 1;
        }
    }
    total / pairs as f64
}

fn option_tokens(option: &str) -> HashSet<String> {
    let lowered = option.to_lowercase();
    RE_WORD.as_ref().map_or_else(HashSet::new, |re| {
        re.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
    })
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
