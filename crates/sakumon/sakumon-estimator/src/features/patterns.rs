//! Compiled text patterns.
//!
//! Each pattern is compiled once on first use. A pattern that fails to
//! compile is `None` and every count over it is zero.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! text_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Solution snippet ───────────────────────────────────────────────────────
text_pattern!(
    RE_SOLUTION_MARKER,
    r"(?i)(解答例|解答|解説|方針|回答|solution|explanation)"
);

// ── Steps ──────────────────────────────────────────────────────────────────
text_pattern!(RE_NUMBERED_STEP, r"(?:^|\n)\s*\d+\s*[\)\]\.|．）]");
text_pattern!(RE_STEP_KEYWORD, r"(?i)ステップ|step|手順");

// ── Math markup ────────────────────────────────────────────────────────────
text_pattern!(RE_INLINE_MATH, r"\$[^$]+\$|\\\([^\)]+\\\)");
text_pattern!(RE_DISPLAY_MATH, r"\\\[[^\]]+\\\]|\\begin\{equation\}");
text_pattern!(RE_FRAC, r"\\frac\s*\{");
text_pattern!(RE_INTEGRAL, r"\\int");
text_pattern!(RE_SUM, r"\\sum");

// ── Multiple choice ────────────────────────────────────────────────────────
text_pattern!(RE_INLINE_OPTION, r"\([A-D]\)\s*([^\(\n]+)");
text_pattern!(RE_LINE_OPTION, r"^\s*([A-D])(?:\.|\)|：|:)\s*(.+)");

// ── Words ──────────────────────────────────────────────────────────────────
text_pattern!(RE_WORD, r"[A-Za-z0-9一-龥ぁ-んァ-ヴ]+");

/// Number of non-overlapping matches, zero when the pattern is unavailable.
pub fn count(pattern: &LazyLock<Option<Regex>>, text: &str) -> usize {
    pattern.as_ref().map_or(0, |re| re.find_iter(text).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        for (name, pat) in [
            ("solution_marker", &RE_SOLUTION_MARKER),
            ("numbered_step", &RE_NUMBERED_STEP),
            ("step_keyword", &RE_STEP_KEYWORD),
            ("inline_math", &RE_INLINE_MATH),
            ("display_math", &RE_DISPLAY_MATH),
            ("frac", &RE_FRAC),
            ("integral", &RE_INTEGRAL),
            ("sum", &RE_SUM),
            ("inline_option", &RE_INLINE_OPTION),
            ("line_option", &RE_LINE_OPTION),
            ("word", &RE_WORD),
        ] {
            assert!(pat.is_some(), "{name} failed to compile");
        }
    }

    #[test]
    fn count_finds_non_overlapping_matches() {
        assert_eq!(count(&RE_INTEGRAL, r"\int_0^1 \int_0^x f"), 2);
        assert_eq!(count(&RE_INLINE_MATH, "$a$ and $b$"), 2);
        assert_eq!(count(&RE_DISPLAY_MATH, r"\[ x^2 \] \begin{equation}"), 2);
    }
}
