//! Phase 2: Duplicate grouping via connected components of the similarity graph.
//!
//! Nodes are distinct normalized labels (arena indices), edges are label pairs
//! scoring at or above `similarity_threshold`. Components are found with
//! union-find, so the result does not depend on edge discovery order.
//! Bridging is transitive: A~B and B~C put A and C in one group even if A≁C.

use labelfold_core::models::{LabelGroup, NormalizedLabel};
use petgraph::unionfind::UnionFind;
use rustc_hash::FxHashMap;

use crate::algorithms::similarity::{find_similar_pairs, LabelProfile, PairScan};

/// Groups plus the scan that produced their edges.
#[derive(Debug, Clone)]
pub struct GroupingOutcome {
    pub groups: Vec<LabelGroup>,
    pub scan: PairScan,
}

/// Scan for duplicate edges and collapse connected components into groups.
pub fn group_duplicates(
    labels: Vec<NormalizedLabel>,
    similarity_threshold: f64,
    parallel: bool,
) -> GroupingOutcome {
    let scan = {
        let profiles: Vec<LabelProfile> = labels.iter().map(|l| LabelProfile::new(&l.text)).collect();
        find_similar_pairs(&profiles, similarity_threshold, parallel)
    };
    let edges: Vec<(usize, usize)> = scan.pairs.iter().map(|p| (p.a, p.b)).collect();
    let groups = connected_components(labels, &edges);
    GroupingOutcome { groups, scan }
}

/// Collapse `labels` into one group per connected component of `edges`.
///
/// Groups are ordered by their lowest member index; members keep arena order.
pub fn connected_components(labels: Vec<NormalizedLabel>, edges: &[(usize, usize)]) -> Vec<LabelGroup> {
    let mut components = UnionFind::<usize>::new(labels.len());
    for &(a, b) in edges {
        components.union(a, b);
    }
    let roots = components.into_labeling();

    let mut slot_of_root: FxHashMap<usize, usize> = FxHashMap::default();
    let mut members: Vec<Vec<NormalizedLabel>> = Vec::new();
    for (label, root) in labels.into_iter().zip(roots) {
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            members.push(Vec::new());
            members.len() - 1
        });
        members[slot].push(label);
    }

    members.into_iter().map(LabelGroup::from_members).collect()
}
