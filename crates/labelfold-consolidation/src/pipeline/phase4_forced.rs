//! Phase 4: Forced folding into the catch-all bucket.
//!
//! The only phase that can guarantee the category budget. While too many
//! groups remain, the lowest-frequency group (ties: canonical display name,
//! then position) is folded into "Other". A natural group whose members normalize
//! to "other" is adopted as the bucket instead of creating a second one.

use labelfold_core::constants::OTHER_NORMALIZED_KEY;
use labelfold_core::models::LabelGroup;
use tracing::{debug, warn};

use super::phase5_naming::canonical_name;

/// Groups within budget and how many were folded away.
#[derive(Debug, Clone)]
pub struct ForcedOutcome {
    pub groups: Vec<LabelGroup>,
    pub folds: usize,
}

/// Fold groups into the bucket until at most `max_categories` remain.
///
/// `max_categories` must be at least 1. The bucket occupies one slot: when
/// it is created it is appended after every surviving group.
pub fn force_reduce(mut groups: Vec<LabelGroup>, max_categories: usize) -> ForcedOutcome {
    if groups.len() <= max_categories {
        return ForcedOutcome { groups, folds: 0 };
    }

    warn!(
        groups = groups.len(),
        max_categories,
        "similarity merging left too many groups, folding the rarest into the catch-all bucket"
    );

    let adopted = groups
        .iter()
        .position(|g| g.is_other || g.contains_normalized(OTHER_NORMALIZED_KEY));
    if let Some(i) = adopted {
        groups[i].is_other = true;
    }

    let names: Vec<String> = groups.iter().map(canonical_name).collect();
    let mut candidates: Vec<usize> = (0..groups.len()).filter(|&i| Some(i) != adopted).collect();
    candidates.sort_by(|&x, &y| {
        groups[x]
            .frequency
            .cmp(&groups[y].frequency)
            .then_with(|| names[x].cmp(&names[y]))
            .then_with(|| x.cmp(&y))
    });

    // The first fold into a fresh bucket frees no slot.
    let mut remaining = groups.len();
    let mut bucket_pending = adopted.is_none();
    let mut folded = vec![false; groups.len()];
    for &i in &candidates {
        if remaining <= max_categories {
            break;
        }
        folded[i] = true;
        if bucket_pending {
            bucket_pending = false;
        } else {
            remaining -= 1;
        }
    }

    let mut bucket = LabelGroup::other_bucket();
    let mut survivors = Vec::with_capacity(remaining);
    let mut adopted_slot = None;
    let mut folds = 0;
    for (i, group) in groups.into_iter().enumerate() {
        if folded[i] {
            debug!(group = %names[i], frequency = group.frequency, "folded into catch-all");
            bucket.absorb(group);
            folds += 1;
        } else {
            if Some(i) == adopted {
                adopted_slot = Some(survivors.len());
            }
            survivors.push(group);
        }
    }

    match adopted_slot {
        Some(slot) => survivors[slot].absorb(bucket),
        None if folds > 0 => survivors.push(bucket),
        None => {}
    }

    ForcedOutcome {
        groups: survivors,
        folds,
    }
}
