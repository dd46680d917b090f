use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::OTHER_BUCKET_WARNING_SHARE;

/// Per-run counters describing how the pipeline reduced the label set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationDiagnostics {
    /// Distinct raw labels after summing duplicates.
    pub distinct_raw_labels: usize,
    /// Distinct normalized labels (graph nodes).
    pub distinct_normalized_labels: usize,
    /// Label pairs whose full similarity was computed.
    pub pairs_compared: usize,
    /// Label pairs skipped by the pruning bound.
    pub pairs_pruned: usize,
    /// Candidate duplicate edges.
    pub duplicate_edges: usize,
    /// Groups after connected-component grouping.
    pub groups_after_grouping: usize,
    /// Groups after agglomerative merging.
    pub groups_after_hierarchical: usize,
    /// Groups after forced folding.
    pub groups_after_forced: usize,
    /// Number of agglomerative merges performed.
    pub hierarchical_merges: usize,
    /// Number of groups folded into the catch-all bucket.
    pub forced_folds: usize,
    /// Whether the catch-all bucket exists in the output.
    pub other_bucket_used: bool,
    /// Raw labels mapped to the catch-all bucket.
    pub labels_in_other: usize,
}

impl ConsolidationDiagnostics {
    /// Human-readable warnings about the quality of the reduction.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.distinct_raw_labels > 0 {
            let share = self.labels_in_other as f64 / self.distinct_raw_labels as f64;
            if share > OTHER_BUCKET_WARNING_SHARE {
                warnings.push(format!(
                    "{:.0}% of labels landed in the catch-all bucket; consider a larger category budget or a lower threshold",
                    share * 100.0
                ));
            }
        }
        if self.distinct_raw_labels > 1 && self.groups_after_forced == self.distinct_raw_labels {
            warnings.push("no labels were consolidated".to_string());
        }
        warnings
    }
}

impl fmt::Display for ConsolidationDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConsolidationDiagnostics {{ raw={}, normalized={}, compared={}, pruned={}, edges={}, groups={}->{}->{}, merges={}, folds={}, other={} }}",
            self.distinct_raw_labels,
            self.distinct_normalized_labels,
            self.pairs_compared,
            self.pairs_pruned,
            self.duplicate_edges,
            self.groups_after_grouping,
            self.groups_after_hierarchical,
            self.groups_after_forced,
            self.hierarchical_merges,
            self.forced_folds,
            self.labels_in_other,
        )
    }
}
