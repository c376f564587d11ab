//! Frequency-based keyword extraction.
//!
//! Lowercases the complaint, keeps alphabetic tokens of length >= 4,
//! drops a fixed function-word set, then returns the most frequent terms
//! with first-occurrence order breaking ties.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z]{4,}\b").expect("TOKEN_REGEX: invalid pattern"));

/// Common English function words excluded from extraction.
const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "and", "or", "but", "in", "with", "to", "for",
    "of", "as", "by", "this", "that", "are", "was", "were", "been", "be", "have", "has", "had",
    "do", "does", "did", "will", "would", "should", "could", "may", "might",
];

/// Extract the `top_n` most frequent salient terms from `text`.
///
/// Blank input yields an empty vec, never an error.
pub fn extract(text: &str, top_n: usize) -> Vec<String> {
    if text.trim().is_empty() || top_n == 0 {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for token in TOKEN_REGEX.find_iter(&lowered) {
        let word = token.as_str();
        if STOP_WORDS.contains(&word) {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            first_seen.push(word);
        }
        *count += 1;
    }

    // Stable sort keeps first-occurrence order within equal counts.
    let mut ranked = first_seen;
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
    ranked.into_iter().take(top_n).map(String::from).collect()
}
