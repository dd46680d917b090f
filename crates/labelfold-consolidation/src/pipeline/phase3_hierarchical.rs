//! Phase 3: Hierarchical reduction. Single-linkage agglomeration over groups.
//!
//! Runs only while the group count exceeds `max_categories`. Group linkage is
//! the maximum label-to-label similarity between their members. Each step
//! merges the most similar pair; ties go to the pair with the smaller combined
//! frequency, then to the lexicographically smaller pair of canonical display
//! names. Pairs below `min_merge_similarity` are never merged, so this phase
//! may stop above the budget and leave the rest to forced folding.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use labelfold_core::models::LabelGroup;
use tracing::debug;

use super::phase5_naming::canonical_name;
use crate::algorithms::similarity::{find_similar_pairs, LabelProfile};

/// Surviving groups and how many merges produced them.
#[derive(Debug, Clone)]
pub struct ReductionOutcome {
    pub groups: Vec<LabelGroup>,
    pub merges: usize,
}

type Linkage = BTreeMap<(usize, usize), f64>;

/// Merge groups until at most `max_categories` remain or no pair qualifies.
///
/// Surviving groups keep their relative order; a merged group sits at the
/// position of the earlier of its two parents.
pub fn reduce(
    groups: Vec<LabelGroup>,
    max_categories: usize,
    min_merge_similarity: f64,
    parallel: bool,
) -> ReductionOutcome {
    if groups.len() <= max_categories {
        return ReductionOutcome { groups, merges: 0 };
    }

    let mut linkage = initial_linkage(&groups, min_merge_similarity, parallel);
    let mut names: Vec<String> = groups.iter().map(canonical_name).collect();
    let mut frequencies: Vec<u64> = groups.iter().map(|g| g.frequency).collect();
    let mut slots: Vec<Option<LabelGroup>> = groups.into_iter().map(Some).collect();

    let mut active = slots.len();
    let mut merges = 0;
    while active > max_categories {
        let Some((a, b, similarity)) = best_pair(&linkage, &frequencies, &names) else {
            break;
        };
        let Some(absorbed) = slots[b].take() else {
            break;
        };
        let Some(target) = slots[a].as_mut() else {
            break;
        };
        target.absorb(absorbed);
        debug!(
            into = %names[a],
            absorbed = %names[b],
            similarity,
            "hierarchical merge"
        );
        names[a] = canonical_name(target);
        frequencies[a] = target.frequency;
        relink(&mut linkage, a, b);
        active -= 1;
        merges += 1;
    }

    ReductionOutcome {
        groups: slots.into_iter().flatten().collect(),
        merges,
    }
}

/// Group-to-group linkage from every member pair at or above `floor`.
fn initial_linkage(groups: &[LabelGroup], floor: f64, parallel: bool) -> Linkage {
    let owners: Vec<usize> = groups
        .iter()
        .enumerate()
        .flat_map(|(g, group)| std::iter::repeat(g).take(group.members.len()))
        .collect();
    let profiles: Vec<LabelProfile> = groups
        .iter()
        .flat_map(|g| g.members.iter())
        .map(|m| LabelProfile::new(&m.text))
        .collect();

    let mut linkage = Linkage::new();
    for pair in find_similar_pairs(&profiles, floor, parallel).pairs {
        let (x, y) = (owners[pair.a], owners[pair.b]);
        if x == y {
            continue;
        }
        raise(&mut linkage, (x.min(y), x.max(y)), pair.score);
    }
    linkage
}

fn raise(linkage: &mut Linkage, key: (usize, usize), score: f64) {
    let entry = linkage.entry(key).or_insert(score);
    if score > *entry {
        *entry = score;
    }
}

/// The next pair to merge, as `(kept, absorbed, similarity)` with `kept < absorbed`.
fn best_pair(linkage: &Linkage, frequencies: &[u64], names: &[String]) -> Option<(usize, usize, f64)> {
    linkage
        .iter()
        .min_by(|(ka, sa), (kb, sb)| merge_order(**ka, **sa, **kb, **sb, frequencies, names))
        .map(|(&(a, b), &s)| (a, b, s))
}

fn merge_order(
    ka: (usize, usize),
    sa: f64,
    kb: (usize, usize),
    sb: f64,
    frequencies: &[u64],
    names: &[String],
) -> Ordering {
    let combined = |(x, y): (usize, usize)| frequencies[x].saturating_add(frequencies[y]);
    let name_pair = |(x, y): (usize, usize)| {
        let (p, q) = (names[x].as_str(), names[y].as_str());
        if p <= q {
            (p, q)
        } else {
            (q, p)
        }
    };
    sb.total_cmp(&sa)
        .then_with(|| combined(ka).cmp(&combined(kb)))
        .then_with(|| name_pair(ka).cmp(&name_pair(kb)))
        .then_with(|| ka.cmp(&kb))
}

/// Re-point every link of `b` at `a`, keeping the maximum on collisions.
fn relink(linkage: &mut Linkage, a: usize, b: usize) {
    let moved: Vec<((usize, usize), f64)> = linkage
        .iter()
        .filter(|((x, y), _)| *x == b || *y == b)
        .map(|(k, s)| (*k, *s))
        .collect();
    for (key, score) in moved {
        linkage.remove(&key);
        let other = if key.0 == b { key.1 } else { key.0 };
        if other == a {
            continue;
        }
        raise(linkage, (other.min(a), other.max(a)), score);
    }
}
