//! Hashed term-frequency provider.
//!
//! Deterministic dense vectors from FNV-hashed term buckets. Needs no model
//! or network, so it is always available.

use std::collections::HashMap;

use sakumon_core::errors::SakumonResult;
use sakumon_core::traits::IEmbeddingProvider;

/// Offline embedding provider.
///
/// Latin-script words (two or more characters) are terms as-is; runs of CJK
/// ideographs and kana contribute overlapping character bigrams, since those
/// scripts do not separate words with spaces.
pub struct HashedTfIdfProvider {
    dimensions: usize,
}

impl HashedTfIdfProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    fn tokenize(text: &str) -> Vec<String> {
        let mut terms = Vec::new();
        for word in text.split(|c: char| !c.is_alphanumeric() && c != '_') {
            if word.is_empty() {
                continue;
            }
            let chars: Vec<char> = word.chars().collect();
            if chars.iter().any(|c| is_unsegmented(*c)) {
                if chars.len() == 1 {
                    terms.push(word.to_string());
                } else {
                    terms.extend(chars.windows(2).map(|w| w.iter().collect::<String>()));
                }
            } else if chars.len() >= 2 {
                terms.push(word.to_lowercase());
            }
        }
        terms
    }

    fn term_vector(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        let tokens = Self::tokenize(text);
        if tokens.is_empty() || self.dimensions == 0 {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in &tf {
            let freq = count / total;
            // Longer terms are rarer; a cheap stand-in for corpus idf.
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::hash_term(term, self.dimensions)] += freq * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

fn is_unsegmented(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'     // hiragana, katakana
        | '\u{3400}'..='\u{4DBF}'   // CJK extension A
        | '\u{4E00}'..='\u{9FFF}'   // CJK unified ideographs
        | '\u{AC00}'..='\u{D7AF}'   // hangul syllables
        | '\u{F900}'..='\u{FAFF}'   // CJK compatibility ideographs
    )
}

impl IEmbeddingProvider for HashedTfIdfProvider {
    fn embed(&self, text: &str) -> SakumonResult<Vec<f32>> {
        Ok(self.term_vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> SakumonResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.term_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tfidf"
    }

    fn is_available(&self) -> bool {
        true
    }
}
