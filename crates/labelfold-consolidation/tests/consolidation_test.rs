//! Integration tests for labelfold-consolidation: scenarios, golden fixtures,
//! and the budget/partition guarantees.

use labelfold_core::config::{ClusteringMethod, ConsolidationConfig};
use labelfold_core::errors::{ConfigError, LabelfoldError};
use labelfold_core::models::{ConsolidationResult, Label};
use labelfold_core::traits::ILabelConsolidator;

use labelfold_consolidation::engine::{consolidate, ConsolidationEngine};
use test_fixtures::{distinct_labels, golden_scenarios, synthetic_labels, ExpectedCategory, InMemoryLabelSource};

fn labels(pairs: &[(&str, u64)]) -> Vec<Label> {
    pairs.iter().map(|&(t, f)| Label::new(t, f)).collect()
}

fn categories(result: &ConsolidationResult) -> Vec<ExpectedCategory> {
    result
        .statistics
        .per_category_counts
        .iter()
        .map(|c| ExpectedCategory {
            name: c.name.clone(),
            label_count: c.label_count,
            frequency: c.frequency,
        })
        .collect()
}

fn assert_partition(input: &[Label], result: &ConsolidationResult) {
    let mut distinct: Vec<&str> = Vec::new();
    for label in input {
        if !distinct.contains(&label.text.as_str()) {
            distinct.push(&label.text);
        }
    }
    let mapped: Vec<&str> = result.mapping.iter().map(|m| m.raw_label.as_str()).collect();
    assert_eq!(mapped, distinct, "mapping must list each distinct raw label once, in input order");

    let counted: usize = result.statistics.per_category_counts.iter().map(|c| c.label_count).sum();
    assert_eq!(counted, result.statistics.original_count);
    assert_eq!(result.statistics.original_count, distinct.len());

    let names = result.category_names();
    for row in &result.mapping {
        assert!(names.contains(&row.canonical_category.as_str()));
    }
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn work_family_collapses_case_duplicates() {
    let input = labels(&[("Work", 5), ("work", 3), ("work-related", 1), ("Personal", 2)]);
    let result = consolidate(&input, &ConsolidationConfig::default()).unwrap();

    assert_eq!(result.category_of("Work"), Some("Work"));
    assert_eq!(result.category_of("work"), Some("Work"));
    assert_eq!(result.category_of("Personal"), Some("Personal"));
    // Hyphenated variant scores ~0.31 against "work", below the default 0.8.
    assert_eq!(result.category_of("work-related"), Some("Work Related"));
    assert_eq!(result.statistics.final_count, 3);
    assert_partition(&input, &result);
}

#[test]
fn work_family_links_at_looser_threshold() {
    let input = labels(&[("Work", 5), ("work", 3), ("work-related", 1), ("Personal", 2)]);
    let config = ConsolidationConfig::default().with_similarity_threshold(0.3);
    let result = consolidate(&input, &config).unwrap();

    assert_eq!(result.category_names(), vec!["Work", "Personal"]);
    assert_eq!(result.members_of("Work"), vec!["Work", "work", "work-related"]);
    assert_eq!(result.statistics.per_category_counts[0].frequency, 9);
}

#[test]
fn forty_distinct_labels_fold_into_other() {
    let input = distinct_labels(40);
    let config = ConsolidationConfig::default().with_max_categories(10);
    let result = consolidate(&input, &config).unwrap();

    assert_eq!(result.statistics.final_count, 10);
    assert_eq!(
        result.category_names(),
        vec!["Jade", "Khaki", "Lemon", "Magenta", "Navy", "Olive", "Pearl", "Quartz", "Ruby", "Other"]
    );
    let other = &result.statistics.per_category_counts[9];
    assert!(other.is_other);
    assert_eq!(other.label_count, 31);
    assert_eq!(other.frequency, (1..=31).sum::<u64>());
    assert_eq!(result.diagnostics.hierarchical_merges, 0);
    assert_eq!(result.diagnostics.forced_folds, 31);
    assert!(!result.diagnostics.warnings().is_empty());
    assert_partition(&input, &result);
}

#[test]
fn empty_input_has_no_categories() {
    let result = consolidate(&[], &ConsolidationConfig::default()).unwrap();
    assert!(result.mapping.is_empty());
    assert_eq!(result.statistics.original_count, 0);
    assert_eq!(result.statistics.final_count, 0);
    assert_eq!(result.statistics.consolidation_ratio, 1.0);
    assert!(result.statistics.per_category_counts.is_empty());
}

#[test]
fn zero_budget_is_a_config_error() {
    let config = ConsolidationConfig::default().with_max_categories(0);
    let err = consolidate(&labels(&[("News", 1)]), &config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "consolidation.max_categories"));
}

#[test]
fn out_of_range_threshold_is_a_config_error() {
    let config = ConsolidationConfig::default().with_similarity_threshold(1.5);
    assert!(ConsolidationEngine::new(config).is_err());
}

#[test]
fn single_label_keeps_its_name() {
    let result = consolidate(&labels(&[("News", 1)]), &ConsolidationConfig::default()).unwrap();
    assert_eq!(result.category_names(), vec!["News"]);
    assert_eq!(result.statistics.consolidation_ratio, 1.0);
}

#[test]
fn shouted_labels_are_title_cased() {
    let input = labels(&[("IMPORTANT", 3), ("wORK-rELATED", 1)]);
    let result = consolidate(&input, &ConsolidationConfig::default()).unwrap();
    assert_eq!(result.category_names(), vec!["Important", "Work Related"]);
    assert_eq!(result.category_of("IMPORTANT"), Some("Important"));
    assert_eq!(result.members_of("Work Related"), vec!["wORK-rELATED"]);
}

#[test]
fn blank_labels_are_named_placeholder() {
    let input = labels(&[("   ", 2), ("", 1), ("Receipts", 4)]);
    let result = consolidate(&input, &ConsolidationConfig::default()).unwrap();
    assert_eq!(result.category_of("   "), Some("(blank)"));
    assert_eq!(result.category_of(""), Some("(blank)"));
    assert_eq!(result.category_of("Receipts"), Some("Receipts"));
    assert_partition(&input, &result);
}

#[test]
fn transitive_bridging_links_outer_variants() {
    let input = labels(&[("followup", 3), ("follow-ups", 1), ("followups", 2)]);
    let config = ConsolidationConfig::default().with_similarity_threshold(0.7);
    let result = consolidate(&input, &config).unwrap();
    assert_eq!(result.statistics.final_count, 1);
    assert_eq!(result.category_names(), vec!["Followup"]);
}

#[test]
fn natural_other_label_absorbs_the_fold() {
    let mut input = distinct_labels(5);
    input.push(Label::new("other", 1));
    let config = ConsolidationConfig::default().with_max_categories(3);
    let result = consolidate(&input, &config).unwrap();

    assert_eq!(result.statistics.final_count, 3);
    let others: Vec<_> = result
        .statistics
        .per_category_counts
        .iter()
        .filter(|c| c.name == "Other")
        .collect();
    assert_eq!(others.len(), 1);
    assert!(others[0].is_other);
    assert_eq!(result.category_of("other"), Some("Other"));
}

// ── Modes ───────────────────────────────────────────────────────────────────

#[test]
fn graph_only_skips_agglomeration() {
    let input = labels(&[("newsletter", 3), ("news-letters", 1), ("travel", 5)]);
    let hierarchical = consolidate(&input, &ConsolidationConfig::default().with_max_categories(2)).unwrap();
    let graph_only = consolidate(
        &input,
        &ConsolidationConfig::default()
            .with_max_categories(2)
            .with_clustering_method(ClusteringMethod::GraphOnly),
    )
    .unwrap();

    assert_eq!(hierarchical.category_names(), vec!["Newsletter", "Travel"]);
    assert_eq!(hierarchical.diagnostics.hierarchical_merges, 1);
    assert_eq!(graph_only.category_names(), vec!["Travel", "Other"]);
    assert_eq!(graph_only.diagnostics.hierarchical_merges, 0);
}

#[test]
fn parallel_and_sequential_runs_are_identical() {
    let input = synthetic_labels(400);
    let base = ConsolidationConfig::default().with_max_categories(12);
    let sequential = consolidate(&input, &base.clone().with_parallel(false)).unwrap();
    let parallel = consolidate(&input, &base.with_parallel(true)).unwrap();
    assert_eq!(sequential.mapping, parallel.mapping);
    assert_eq!(sequential.fingerprint(), parallel.fingerprint());
}

// ── Guarantees ──────────────────────────────────────────────────────────────

#[test]
fn budget_holds_for_every_limit() {
    let input = synthetic_labels(200);
    for max in [1, 2, 5, 16, 50, 500] {
        let config = ConsolidationConfig::default().with_max_categories(max);
        let result = consolidate(&input, &config).unwrap();
        assert!(result.statistics.final_count <= max, "max {max}");
        assert_partition(&input, &result);
    }
}

#[test]
fn group_counts_never_grow_across_phases() {
    let input = synthetic_labels(300);
    let result = consolidate(&input, &ConsolidationConfig::default().with_max_categories(7)).unwrap();
    let d = &result.diagnostics;
    assert!(d.distinct_normalized_labels <= d.distinct_raw_labels);
    assert!(d.groups_after_grouping <= d.distinct_normalized_labels);
    assert!(d.groups_after_hierarchical <= d.groups_after_grouping);
    assert!(d.groups_after_forced <= d.groups_after_hierarchical);
    assert_eq!(d.groups_after_forced, result.statistics.final_count);
}

#[test]
fn reruns_are_byte_identical() {
    let input = synthetic_labels(250);
    let config = ConsolidationConfig::default().with_max_categories(9);
    let first = consolidate(&input, &config).unwrap();
    let second = consolidate(&input, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
}

// ── Seams ───────────────────────────────────────────────────────────────────

#[test]
fn engine_consolidates_from_source() {
    let engine = ConsolidationEngine::new(ConsolidationConfig::default()).unwrap();
    let source = InMemoryLabelSource::new("inbox", labels(&[("Receipts", 4), ("receipt", 1)]));
    let result = engine.consolidate_from(&source).unwrap();
    assert_eq!(result.category_names(), vec!["Receipts"]);

    let down = InMemoryLabelSource::unavailable("imap", "auth expired");
    let err = engine.consolidate_from(&down).unwrap_err();
    assert!(matches!(err, LabelfoldError::SourceUnavailable { .. }));
}

#[test]
fn engine_is_usable_as_trait_object() {
    let engine: Box<dyn ILabelConsolidator> = Box::new(ConsolidationEngine::default());
    let result = engine.consolidate(&labels(&[("Taxes", 6), ("taxes", 1)])).unwrap();
    assert_eq!(result.category_names(), vec!["Taxes"]);
}

// ── Golden fixtures ─────────────────────────────────────────────────────────

#[test]
fn golden_scenarios_match() {
    let scenarios = golden_scenarios();
    assert!(!scenarios.is_empty(), "no golden consolidation scenarios found");
    for scenario in scenarios {
        for case in &scenario.cases {
            let config = ConsolidationConfig::default()
                .with_max_categories(case.max_categories)
                .with_similarity_threshold(case.similarity_threshold)
                .with_clustering_method(case.clustering_method);
            let result = consolidate(&scenario.labels, &config).unwrap();
            let context = format!(
                "{} (max={}, threshold={}, method={})",
                scenario.name, case.max_categories, case.similarity_threshold, case.clustering_method
            );

            assert_eq!(categories(&result), case.expected_categories, "{context}");
            for (raw, category) in &case.expected_mapping {
                assert_eq!(result.category_of(raw), Some(category.as_str()), "{context}: {raw}");
            }
            assert_partition(&scenario.labels, &result);
        }
    }
}
