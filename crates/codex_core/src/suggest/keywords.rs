//! Keyword extraction for relevance scoring.
//!
//! # Invariants
//! - Output tokens are lowercase, contain only letters/digits, are longer
//!   than two chars, and are never stop-words.
//! - Output preserves input order; [`extract_keywords`] keeps duplicates.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Tokens with this many chars or fewer are dropped.
pub const MAX_SHORT_TOKEN_CHARS: usize = 2;

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]+").expect("valid punctuation regex"));

const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "and", "any", "are", "aren",
    "because", "been", "before", "being", "below", "between", "both", "but", "can", "cannot",
    "could", "couldn", "did", "didn", "does", "doesn", "doing", "don", "dont", "down", "during",
    "each", "few", "for", "from", "further", "had", "hadn", "has", "hasn", "have", "haven",
    "having", "her", "here", "hers", "herself", "him", "himself", "his", "how", "into", "isn",
    "its", "itself", "just", "let", "more", "most", "mustn", "myself", "nor", "not", "now", "off",
    "once", "only", "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shan", "she", "should", "shouldn", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "too",
    "under", "until", "very", "was", "wasn", "were", "weren", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "won", "would", "wouldn", "you", "your",
    "yours", "yourself", "yourselves",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Returns whether `token` (already lowercase) is an English stop-word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}

/// Extracts ordered keywords from free text.
///
/// Punctuation is removed rather than replaced, so `don't` becomes `dont`
/// and `self-aware` becomes `selfaware`.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .filter(|token| token.chars().count() > MAX_SHORT_TOKEN_CHARS)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Like [`extract_keywords`] but drops repeated tokens, keeping the first
/// occurrence of each.
pub fn unique_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_keywords(text)
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Unordered keyword set of `text`.
pub fn keyword_set(text: &str) -> HashSet<String> {
    extract_keywords(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::{extract_keywords, keyword_set, unique_keywords};

    #[test]
    fn empty_input_yields_no_keywords() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("  ...  !!! ").is_empty());
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            extract_keywords("Simulacra, and SIMULATION!"),
            vec!["simulacra", "simulation"]
        );
        assert_eq!(extract_keywords("don't self-aware"), vec!["selfaware"]);
    }

    #[test]
    fn drops_short_tokens_and_stop_words() {
        assert_eq!(
            extract_keywords("an ox is on the hill with a cat"),
            vec!["hill", "cat"]
        );
    }

    #[test]
    fn keeps_digits_and_non_ascii_letters() {
        assert_eq!(
            extract_keywords("Année 1984 über"),
            vec!["année", "1984", "über"]
        );
    }

    #[test]
    fn unique_keywords_keeps_first_occurrence_order() {
        assert_eq!(
            unique_keywords("memory palace memory method palace"),
            vec!["memory", "palace", "method"]
        );
        assert_eq!(keyword_set("memory palace memory").len(), 2);
    }
}
