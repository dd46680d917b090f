//! Label text normalization: NFKC, lowercase, whitespace collapse, trailing punctuation.

use labelfold_core::constants::{MAX_NORMALIZE_PASSES, TRAILING_PUNCTUATION};
use unicode_normalization::UnicodeNormalization;

/// Normalize raw label text. Total: every input, including blank text, has a
/// normalized form.
///
/// Internal hyphens and underscores are kept; they only act as word
/// boundaries when n-grams are computed.
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_pass(raw);
    // Some case mappings leave NFKC form; iterate until the pass is a no-op.
    for _ in 1..MAX_NORMALIZE_PASSES {
        let next = normalize_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn normalize_pass(raw: &str) -> String {
    let folded = raw.nfkc().collect::<String>().to_lowercase();
    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c) || c.is_whitespace())
        .to_string()
}
