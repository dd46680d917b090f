//! Phase 5: Canonical naming. One display name per final group.
//!
//! Representative = raw label with the highest individual frequency; ties go
//! to the shorter raw string, then the lexicographically first. The display
//! form replaces `_`/`-` with spaces and title-cases each word. The catch-all
//! bucket is always named "Other".

use std::cmp::Ordering;

use labelfold_core::constants::{BLANK_CATEGORY_NAME, OTHER_CATEGORY_NAME};
use labelfold_core::models::{Label, LabelGroup};
use rustc_hash::FxHashSet;

/// Pick the raw label that names `group`. `None` only for an empty group.
pub fn representative(group: &LabelGroup) -> Option<&Label> {
    group.raw_labels().min_by(|a, b| compare_candidates(a, b))
}

/// Ordering where the preferred representative sorts first.
fn compare_candidates(a: &Label, b: &Label) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| a.text.chars().count().cmp(&b.text.chars().count()))
        .then_with(|| a.text.cmp(&b.text))
}

/// Raw text of the representative, used as a provisional name for tie-breaks
/// before the group is finalized.
pub fn sort_name(group: &LabelGroup) -> &str {
    representative(group).map(|l| l.text.as_str()).unwrap_or("")
}

/// Title-case a raw label for display.
pub fn display_name(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();
    let words: Vec<String> = spaced.split_whitespace().map(capitalize).collect();
    if words.is_empty() {
        return BLANK_CATEGORY_NAME.to_string();
    }
    words.join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// The display name a group would get, ignoring collisions with other groups.
pub fn canonical_name(group: &LabelGroup) -> String {
    if group.is_other {
        return OTHER_CATEGORY_NAME.to_string();
    }
    display_name(sort_name(group))
}

/// Assign a unique `canonical_name` to every group.
///
/// The bucket keeps "Other" verbatim; a natural group that would collide
/// with an earlier name gets a " (2)", " (3)", … suffix in group order.
pub fn assign_names(groups: &mut [LabelGroup]) {
    let mut used: FxHashSet<String> = FxHashSet::default();
    if groups.iter().any(|g| g.is_other) {
        used.insert(OTHER_CATEGORY_NAME.to_string());
    }

    for group in groups.iter_mut() {
        if group.is_other {
            group.canonical_name = Some(OTHER_CATEGORY_NAME.to_string());
            continue;
        }
        let base = canonical_name(group);
        let mut name = base.clone();
        let mut suffix = 2;
        while used.contains(&name) {
            name = format!("{base} ({suffix})");
            suffix += 1;
        }
        used.insert(name.clone());
        group.canonical_name = Some(name);
    }
}
