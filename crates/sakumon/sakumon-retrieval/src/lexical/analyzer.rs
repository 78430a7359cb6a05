//! Tokenization for the lexical index.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static RE_WORD_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").ok());

pub const CHAR_NGRAM_MIN: usize = 2;
pub const CHAR_NGRAM_MAX: usize = 4;

/// How a document is split into index terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyzer {
    /// Lowercased word tokens of at least two word characters.
    Word,
    /// Character n-grams inside whitespace-delimited words, each word padded
    /// with one space on either side.
    CharWordBounded { min: usize, max: usize },
}

impl Analyzer {
    /// Character n-grams when any document is written in a script without
    /// whitespace word boundaries, word tokens otherwise.
    pub fn for_corpus<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let unsegmented = texts
            .into_iter()
            .any(|t| t.chars().any(is_unsegmented_script));
        if unsegmented {
            Analyzer::CharWordBounded {
                min: CHAR_NGRAM_MIN,
                max: CHAR_NGRAM_MAX,
            }
        } else {
            Analyzer::Word
        }
    }

    pub fn uses_char_ngrams(&self) -> bool {
        matches!(self, Analyzer::CharWordBounded { .. })
    }

    /// Terms of `text` in order of occurrence, duplicates kept.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        match *self {
            Analyzer::Word => match RE_WORD_TOKEN.as_ref() {
                Some(re) => re
                    .find_iter(&lowered)
                    .map(|m| m.as_str().to_string())
                    .collect(),
                None => Vec::new(),
            },
            Analyzer::CharWordBounded { min, max } => char_wb_ngrams(&lowered, min, max),
        }
    }
}

fn char_wb_ngrams(text: &str, min: usize, max: usize) -> Vec<String> {
    let mut grams = Vec::new();
    for word in text.split_whitespace() {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        for n in min..=max {
            if padded.len() <= n {
                // A padded word shorter than n is emitted whole, once.
                grams.push(padded.iter().collect());
                break;
            }
            grams.extend(padded.windows(n).map(|w| w.iter().collect::<String>()));
        }
    }
    grams
}

/// CJK ideographs, kana and Hangul.
pub fn is_unsegmented_script(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}'
    )
}
