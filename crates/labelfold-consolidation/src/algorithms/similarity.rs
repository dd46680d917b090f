//! Blended label similarity: edit distance + trigram Jaccard.
//!
//! score = 0.5 * (1 - lev / max_len) + 0.5 * |A ∩ B| / |A ∪ B|
//!
//! Pairwise scans sort labels by length and skip pairs whose score upper
//! bound is below the threshold. The bound is exact-safe, so a pruned scan
//! returns the same pairs as a full O(n²) scan.

use labelfold_core::constants::{EDIT_DISTANCE_WEIGHT, NGRAM_SIZE, NGRAM_WEIGHT, PRUNE_EPSILON};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use super::ngrams::char_ngrams;

/// Precomputed per-label data for repeated comparisons.
#[derive(Debug, Clone)]
pub struct LabelProfile<'a> {
    pub text: &'a str,
    /// Length in chars.
    pub char_len: usize,
    pub grams: FxHashSet<&'a str>,
}

impl<'a> LabelProfile<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            char_len: text.chars().count(),
            grams: char_ngrams(text, NGRAM_SIZE),
        }
    }
}

/// Similarity of two normalized labels in [0, 1]. Symmetric and reflexive.
pub fn similarity(a: &str, b: &str) -> f64 {
    score(&LabelProfile::new(a), &LabelProfile::new(b))
}

/// Similarity of two precomputed profiles.
pub fn score(a: &LabelProfile<'_>, b: &LabelProfile<'_>) -> f64 {
    EDIT_DISTANCE_WEIGHT * edit_score(a, b) + NGRAM_WEIGHT * jaccard(&a.grams, &b.grams)
}

/// `1 - levenshtein / max(len_a, len_b, 1)`.
pub fn edit_score(a: &LabelProfile<'_>, b: &LabelProfile<'_>) -> f64 {
    let max_len = a.char_len.max(b.char_len).max(1);
    let distance = strsim::levenshtein(a.text, b.text);
    1.0 - distance as f64 / max_len as f64
}

/// Jaccard index of two gram sets. Two empty sets score 1.0.
pub fn jaccard(a: &FxHashSet<&str>, b: &FxHashSet<&str>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 1.0;
    }
    intersection as f64 / union as f64
}

/// Upper bound on `score(a, b)` from lengths and gram counts alone.
///
/// Levenshtein is at least the length difference, so the edit score is at
/// most `short / long`; the Jaccard index is at most `small / large`.
pub fn score_upper_bound(a: &LabelProfile<'_>, b: &LabelProfile<'_>) -> f64 {
    EDIT_DISTANCE_WEIGHT * length_ratio(a.char_len, b.char_len)
        + NGRAM_WEIGHT * length_ratio(a.grams.len(), b.grams.len())
}

fn length_ratio(x: usize, y: usize) -> f64 {
    let (short, long) = if x <= y { (x, y) } else { (y, x) };
    if long == 0 {
        1.0
    } else {
        short as f64 / long as f64
    }
}

/// A label pair scoring at or above a scan threshold. `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarPair {
    pub a: usize,
    pub b: usize,
    pub score: f64,
}

/// Output of a pairwise scan.
#[derive(Debug, Clone, Default)]
pub struct PairScan {
    /// Qualifying pairs, sorted by `(a, b)`.
    pub pairs: Vec<SimilarPair>,
    /// Pairs whose full score was computed.
    pub compared: usize,
    /// Pairs skipped by the upper bound.
    pub pruned: usize,
}

/// Find every profile pair with `score >= threshold`.
///
/// Indices in the returned pairs refer to positions in `profiles`. The result
/// is identical whether or not `parallel` is set.
pub fn find_similar_pairs(profiles: &[LabelProfile<'_>], threshold: f64, parallel: bool) -> PairScan {
    let mut order: Vec<usize> = (0..profiles.len()).collect();
    order.sort_by_key(|&i| (profiles[i].char_len, i));

    let rows: Vec<RowScan> = if parallel {
        (0..order.len())
            .into_par_iter()
            .map(|p| scan_row(profiles, &order, p, threshold))
            .collect()
    } else {
        (0..order.len())
            .map(|p| scan_row(profiles, &order, p, threshold))
            .collect()
    };

    let mut scan = PairScan::default();
    for row in rows {
        scan.compared += row.compared;
        scan.pruned += row.pruned;
        scan.pairs.extend(row.pairs);
    }
    scan.pairs.sort_by_key(|p| (p.a, p.b));
    scan
}

#[derive(Default)]
struct RowScan {
    pairs: Vec<SimilarPair>,
    compared: usize,
    pruned: usize,
}

/// Compare `order[p]` with every longer-or-equal label after it.
fn scan_row(profiles: &[LabelProfile<'_>], order: &[usize], p: usize, threshold: f64) -> RowScan {
    let mut row = RowScan::default();
    let floor = threshold - PRUNE_EPSILON;
    let left = &profiles[order[p]];

    for (q, &j) in order.iter().enumerate().skip(p + 1) {
        let right = &profiles[j];
        // Lengths only grow from here, so once the length term alone (with a
        // perfect Jaccard) cannot reach the threshold, no later pair can.
        let best_case = EDIT_DISTANCE_WEIGHT * length_ratio(left.char_len, right.char_len) + NGRAM_WEIGHT;
        if best_case < floor {
            row.pruned += order.len() - q;
            break;
        }
        if score_upper_bound(left, right) < floor {
            row.pruned += 1;
            continue;
        }
        row.compared += 1;
        let s = score(left, right);
        if s >= threshold {
            let i = order[p];
            row.pairs.push(SimilarPair {
                a: i.min(j),
                b: i.max(j),
                score: s,
            });
        }
    }
    row
}
