//! Solution snippet extraction and step counting.

use super::patterns::{count, RE_NUMBERED_STEP, RE_SOLUTION_MARKER, RE_STEP_KEYWORD};

/// Characters kept after the first solution marker.
pub const SNIPPET_WINDOW_CHARS: usize = 5000;

/// The solution/explanation part of a problem text, bounded to a fixed window
/// starting at the first marker. Empty when no marker occurs.
pub fn solution_snippet(text: &str) -> &str {
    let Some(start) = RE_SOLUTION_MARKER
        .as_ref()
        .and_then(|re| re.find(text))
        .map(|m| m.start())
    else {
        return "";
    };
    let tail = &text[start..];
    match tail.char_indices().nth(SNIPPET_WINDOW_CHARS) {
        Some((end, _)) => &tail[..end],
        None => tail,
    }
}

/// Larger of numbered-line markers and step keyword hits.
pub fn count_steps(snippet: &str) -> usize {
    if snippet.is_empty() {
        return 0;
    }
    count(&RE_NUMBERED_STEP, snippet).max(count(&RE_STEP_KEYWORD, snippet))
}
