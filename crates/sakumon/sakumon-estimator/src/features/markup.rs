//! Math-markup counts and bracket nesting.

use serde::{Deserialize, Serialize};

use super::patterns::{count, RE_DISPLAY_MATH, RE_FRAC, RE_INLINE_MATH, RE_INTEGRAL, RE_SUM};

/// Raw markup counts behind the math and structural features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupCounts {
    pub inline_math: usize,
    pub display_math: usize,
    pub fractions: usize,
    pub integrals: usize,
    pub sums: usize,
    pub max_depth: usize,
}

impl MarkupCounts {
    pub fn of(text: &str) -> Self {
        Self {
            inline_math: count(&RE_INLINE_MATH, text),
            display_math: count(&RE_DISPLAY_MATH, text),
            fractions: count(&RE_FRAC, text),
            integrals: count(&RE_INTEGRAL, text),
            sums: count(&RE_SUM, text),
            max_depth: max_bracket_depth(text),
        }
    }

    /// Display math counts double.
    pub fn weighted_math(&self) -> usize {
        self.inline_math + 2 * self.display_math
    }

    pub fn constructs(&self) -> usize {
        self.fractions + self.integrals + self.sums
    }
}

/// Deepest bracket nesting over `({[` / `)}]`. Unbalanced closers never push
/// the depth below zero.
pub fn max_bracket_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    for ch in text.chars() {
        match ch {
            '(' | '{' | '[' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' | '}' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max_depth
}

/// Count of arithmetic/relational operator characters.
pub fn count_operators(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(c, '+' | '-' | '*' | '/' | '=' | '±' | '×' | '÷'))
        .count()
}
