//! Math-markup normalization for lexical matching.
//!
//! `\frac{a}{b}` and `frac a b` should share tokens, so commands lose their
//! backslash, grouping punctuation becomes whitespace, and runs of
//! whitespace collapse.

use regex::Regex;
use std::sync::LazyLock;

static RE_COMMAND: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\\([A-Za-z]+)").ok());
static RE_SPACES: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// Normalize math markup so queries and documents tokenize alike.
///
/// Display delimiters, braces and `$` are dropped, `\command` becomes
/// ` command `, `^ _ \ & ~` become spaces.
pub fn normalize_math_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = text
        .replace(r"\[", " ")
        .replace(r"\]", " ")
        .replace(['{', '}', '$'], " ");

    if let Some(re) = RE_COMMAND.as_ref() {
        out = re.replace_all(&out, " $1 ").into_owned();
    }

    out = out.replace(['^', '_', '\\', '&', '~'], " ");

    match RE_SPACES.as_ref() {
        Some(re) => re.replace_all(&out, " ").trim().to_string(),
        None => out.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_become_words() {
        assert_eq!(normalize_math_text(r"\frac{a}{b}"), "frac a b");
        assert_eq!(normalize_math_text(r"$\int_0^1 x^2 dx$"), "int 0 1 x 2 dx");
    }

    #[test]
    fn display_delimiters_and_escapes_drop() {
        assert_eq!(normalize_math_text(r"\[ x \] & y ~ z"), "x y z");
        assert_eq!(normalize_math_text(r"$$\sqrt{2}$$"), "sqrt 2");
    }

    #[test]
    fn plain_text_only_collapses_whitespace() {
        assert_eq!(normalize_math_text("  二次関数   の\n最小値 "), "二次関数 の 最小値");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize_math_text(""), "");
        assert_eq!(normalize_math_text("{}$$"), "");
    }
}
