//! 5-phase consolidation pipeline orchestrator.
//!
//! Phase 1: Ingest → Phase 2: Duplicate Grouping → Phase 3: Hierarchical
//! Reduction → Phase 4: Forced Folding → Phase 5: Canonical Naming

pub mod phase1_ingest;
pub mod phase2_grouping;
pub mod phase3_hierarchical;
pub mod phase4_forced;
pub mod phase5_naming;

use labelfold_core::config::{ClusteringMethod, ConsolidationConfig};
use labelfold_core::models::{
    CategorySummary, ConsolidationDiagnostics, ConsolidationResult, ConsolidationStatistics,
    Label, LabelGroup, LabelMapping,
};
use rustc_hash::FxHashMap;
use tracing::{info, info_span, warn};

/// Run the full pipeline on an already validated config.
///
/// Total: every distinct raw label is mapped, and the number of categories
/// never exceeds `config.max_categories`.
pub fn run_pipeline(labels: &[Label], config: &ConsolidationConfig) -> ConsolidationResult {
    let span = info_span!(
        "labelfold.consolidate",
        method = %config.clustering_method,
        max_categories = config.max_categories
    );
    let _guard = span.enter();

    // Phase 1: Ingest.
    let ingested = phase1_ingest::ingest(labels);
    info!(
        raw = ingested.raw_order.len(),
        normalized = ingested.normalized.len(),
        "Phase 1: labels ingested"
    );
    if ingested.raw_order.is_empty() {
        return ConsolidationResult::empty();
    }

    let mut diagnostics = ConsolidationDiagnostics {
        distinct_raw_labels: ingested.raw_order.len(),
        distinct_normalized_labels: ingested.normalized.len(),
        ..Default::default()
    };

    // Phase 2: Duplicate grouping.
    let grouping = phase2_grouping::group_duplicates(
        ingested.normalized,
        config.similarity_threshold,
        config.parallel,
    );
    diagnostics.pairs_compared = grouping.scan.compared;
    diagnostics.pairs_pruned = grouping.scan.pruned;
    diagnostics.duplicate_edges = grouping.scan.pairs.len();
    diagnostics.groups_after_grouping = grouping.groups.len();
    info!(
        groups = grouping.groups.len(),
        edges = grouping.scan.pairs.len(),
        pruned = grouping.scan.pruned,
        "Phase 2: duplicate grouping complete"
    );

    // Phase 3: Hierarchical reduction.
    let groups = match config.clustering_method {
        ClusteringMethod::Hierarchical => {
            let reduction = phase3_hierarchical::reduce(
                grouping.groups,
                config.max_categories,
                config.min_merge_similarity,
                config.parallel,
            );
            diagnostics.hierarchical_merges = reduction.merges;
            info!(
                groups = reduction.groups.len(),
                merges = reduction.merges,
                "Phase 3: hierarchical reduction complete"
            );
            reduction.groups
        }
        ClusteringMethod::GraphOnly => grouping.groups,
    };
    diagnostics.groups_after_hierarchical = groups.len();

    // Phase 4: Forced folding.
    let forced = phase4_forced::force_reduce(groups, config.max_categories);
    diagnostics.forced_folds = forced.folds;
    diagnostics.groups_after_forced = forced.groups.len();
    info!(
        groups = forced.groups.len(),
        folds = forced.folds,
        "Phase 4: forced folding complete"
    );

    // Phase 5: Canonical naming.
    let mut groups = forced.groups;
    phase5_naming::assign_names(&mut groups);
    info!(categories = groups.len(), "Phase 5: categories named");

    let result = assemble(&ingested.raw_order, &groups, diagnostics);
    for warning in result.diagnostics.warnings() {
        warn!(%warning, "consolidation quality");
    }
    result
}

/// Build the mapping (input order), statistics, and final diagnostics.
fn assemble(
    raw_order: &[String],
    groups: &[LabelGroup],
    mut diagnostics: ConsolidationDiagnostics,
) -> ConsolidationResult {
    let mut category_of: FxHashMap<&str, &str> = FxHashMap::default();
    let mut per_category_counts = Vec::with_capacity(groups.len());
    for group in groups {
        let name = group.canonical_name.as_deref().unwrap_or_default();
        for raw in group.raw_labels() {
            category_of.insert(raw.text.as_str(), name);
        }
        per_category_counts.push(CategorySummary {
            name: name.to_string(),
            label_count: group.raw_label_count(),
            frequency: group.frequency,
            is_other: group.is_other,
        });
        if group.is_other {
            diagnostics.other_bucket_used = true;
            diagnostics.labels_in_other = group.raw_label_count();
        }
    }

    let mapping: Vec<LabelMapping> = raw_order
        .iter()
        .filter_map(|raw| {
            category_of.get(raw.as_str()).map(|category| LabelMapping {
                raw_label: raw.clone(),
                canonical_category: (*category).to_string(),
            })
        })
        .collect();

    let original_count = raw_order.len();
    let final_count = groups.len();
    ConsolidationResult {
        mapping,
        statistics: ConsolidationStatistics {
            original_count,
            final_count,
            consolidation_ratio: final_count as f64 / original_count as f64,
            per_category_counts,
        },
        diagnostics,
    }
}
