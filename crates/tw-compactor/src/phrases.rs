//! Repeated-phrase folding: frequent 3-word phrases → acronyms.
//!
//! Lossy and not reversible: no codebook is kept and two phrases may fold to
//! the same acronym.

use std::collections::HashMap;

const PHRASE_WORDS: usize = 3;
const MIN_OCCURRENCES: usize = 3;
const MIN_PHRASE_CHARS: usize = 20;

/// Uppercased initials of the first two words.
pub fn acronym(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .take(2)
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Count every contiguous 3-word phrase, keeping first-seen order.
pub fn count_phrases(text: &str) -> Vec<(String, usize)> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for window in words.windows(PHRASE_WORDS) {
        let phrase = window.join(" ");
        let count = counts.entry(phrase.clone()).or_insert(0);
        if *count == 0 {
            order.push(phrase);
        }
        *count += 1;
    }
    order
        .into_iter()
        .map(|p| {
            let n = counts.get(&p).copied().unwrap_or(0);
            (p, n)
        })
        .collect()
}

/// Phrases that qualify for folding, in discovery order.
pub fn repeated_phrases(text: &str) -> Vec<String> {
    count_phrases(text)
        .into_iter()
        .filter(|(p, n)| *n >= MIN_OCCURRENCES && p.chars().count() >= MIN_PHRASE_CHARS)
        .map(|(p, _)| p)
        .collect()
}

/// Replace every occurrence of each qualifying phrase with its acronym.
pub fn fold(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut result = text.to_string();
    for phrase in repeated_phrases(text) {
        result = result.replace(&phrase, &acronym(&phrase));
    }
    result
}
