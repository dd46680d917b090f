//! Property tests for labelfold-consolidation: normalization, similarity,
//! pruning, and the partition/budget/determinism guarantees.

use std::collections::HashSet;

use proptest::prelude::*;

use labelfold_core::config::{ClusteringMethod, ConsolidationConfig};
use labelfold_core::models::Label;

use labelfold_consolidation::algorithms::similarity::{find_similar_pairs, score, LabelProfile};
use labelfold_consolidation::{consolidate, normalize, similarity};

fn label_text() -> impl Strategy<Value = String> {
    "[A-Za-zÀ-ÖØ-öø-ÿ0-9 ._,:;ﬁ-]{0,24}"
}

fn short_word() -> impl Strategy<Value = String> {
    "[a-e]{1,6}([-_ ][a-e]{1,4})?"
}

fn label_set() -> impl Strategy<Value = Vec<Label>> {
    prop::collection::vec((short_word(), 0u64..50), 0..40)
        .prop_map(|pairs| pairs.into_iter().map(|(t, f)| Label::new(t, f)).collect())
}

fn method() -> impl Strategy<Value = ClusteringMethod> {
    prop_oneof![Just(ClusteringMethod::Hierarchical), Just(ClusteringMethod::GraphOnly)]
}

// Normalization is a fixpoint.
proptest! {
    #[test]
    fn prop_normalize_idempotent(raw in label_text()) {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }
}

// Normalized text never ends in whitespace or trailing punctuation.
proptest! {
    #[test]
    fn prop_normalize_trims_tail(raw in label_text()) {
        let normalized = normalize(&raw);
        if let Some(last) = normalized.chars().last() {
            prop_assert!(!last.is_whitespace());
            prop_assert!(!".,:;-".contains(last));
        }
    }
}

// Similarity is bounded, symmetric, and reflexive.
proptest! {
    #[test]
    fn prop_similarity_bounds(a in short_word(), b in short_word()) {
        let s = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s));
        prop_assert_eq!(s, similarity(&b, &a));
        prop_assert_eq!(similarity(&a, &a), 1.0);
    }
}

// The pruned scan finds exactly the pairs a full scan finds.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn prop_pruning_is_exact(
        texts in prop::collection::vec(short_word(), 0..30),
        threshold in 0.0f64..=1.0,
    ) {
        let profiles: Vec<LabelProfile> = texts.iter().map(|t| LabelProfile::new(t)).collect();
        let mut expected = Vec::new();
        for i in 0..profiles.len() {
            for j in (i + 1)..profiles.len() {
                if score(&profiles[i], &profiles[j]) >= threshold {
                    expected.push((i, j));
                }
            }
        }
        let scan = find_similar_pairs(&profiles, threshold, false);
        let found: Vec<(usize, usize)> = scan.pairs.iter().map(|p| (p.a, p.b)).collect();
        prop_assert_eq!(found, expected);
    }
}

// Every distinct raw label is mapped exactly once and the budget holds.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn prop_partition_and_budget(
        labels in label_set(),
        max in 1usize..12,
        threshold in 0.0f64..=1.0,
        method in method(),
    ) {
        let config = ConsolidationConfig::default()
            .with_max_categories(max)
            .with_similarity_threshold(threshold)
            .with_clustering_method(method);
        let result = consolidate(&labels, &config).unwrap();

        let distinct: HashSet<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        prop_assert_eq!(result.mapping.len(), distinct.len());
        let mapped: HashSet<&str> = result.mapping.iter().map(|m| m.raw_label.as_str()).collect();
        prop_assert_eq!(mapped, distinct);

        prop_assert!(result.statistics.final_count <= max);
        let counted: usize = result.statistics.per_category_counts.iter().map(|c| c.label_count).sum();
        prop_assert_eq!(counted, result.statistics.original_count);

        let names: HashSet<&str> = result.category_names().into_iter().collect();
        prop_assert_eq!(names.len(), result.statistics.final_count);
        prop_assert!(result.statistics.per_category_counts.iter().filter(|c| c.is_other).count() <= 1);
    }
}

// Identical input and config give an identical result.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn prop_deterministic(labels in label_set(), max in 1usize..8) {
        let config = ConsolidationConfig::default().with_max_categories(max);
        let r1 = consolidate(&labels, &config).unwrap();
        let r2 = consolidate(&labels, &config.clone().with_parallel(!config.parallel)).unwrap();
        prop_assert_eq!(r1.fingerprint(), r2.fingerprint());
        prop_assert_eq!(r1, r2);
    }
}

// Raw labels sharing a normalized form always share a category.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn prop_normalized_duplicates_share_category(labels in label_set(), max in 1usize..8) {
        let config = ConsolidationConfig::default().with_max_categories(max);
        let result = consolidate(&labels, &config).unwrap();
        for a in &result.mapping {
            for b in &result.mapping {
                if normalize(&a.raw_label) == normalize(&b.raw_label) {
                    prop_assert_eq!(&a.canonical_category, &b.canonical_category);
                }
            }
        }
    }
}
