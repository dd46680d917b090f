//! Character n-grams over words, for the Jaccard signal.

use labelfold_core::constants::WORD_SEPARATORS;
use rustc_hash::FxHashSet;

/// Split normalized text into words on whitespace, hyphens, and underscores.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || WORD_SEPARATORS.contains(&c))
        .filter(|w| !w.is_empty())
}

/// Character n-grams of every word in `text`.
///
/// A word shorter than `n` characters contributes itself as one gram. Text
/// with no words at all contributes the whole string, so the set is never empty.
pub fn char_ngrams(text: &str, n: usize) -> FxHashSet<&str> {
    let mut grams = FxHashSet::default();
    for word in words(text) {
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();
        let char_len = bounds.len() - 1;
        if char_len < n {
            grams.insert(word);
            continue;
        }
        for start in 0..=(char_len - n) {
            grams.insert(&word[bounds[start]..bounds[start + n]]);
        }
    }
    if grams.is_empty() {
        grams.insert(text);
    }
    grams
}
