use serde::{Deserialize, Serialize};

use super::diagnostics::ConsolidationDiagnostics;

/// One row of the output mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMapping {
    /// The raw label exactly as supplied.
    pub raw_label: String,
    /// Display name of the category it was consolidated into.
    pub canonical_category: String,
}

/// Summary of one output category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    /// Distinct raw labels mapped to this category.
    pub label_count: usize,
    /// Aggregate frequency of those labels.
    pub frequency: u64,
    pub is_other: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationStatistics {
    /// Distinct raw labels in the input.
    pub original_count: usize,
    /// Categories in the output.
    pub final_count: usize,
    /// `final_count / original_count`; 1.0 for empty input.
    pub consolidation_ratio: f64,
    /// One entry per category, in output order.
    pub per_category_counts: Vec<CategorySummary>,
}

/// Result of a consolidation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationResult {
    /// One entry per distinct raw label, in input order.
    pub mapping: Vec<LabelMapping>,
    pub statistics: ConsolidationStatistics,
    pub diagnostics: ConsolidationDiagnostics,
}

impl ConsolidationResult {
    /// The result for an empty label set: zero categories, empty mapping.
    pub fn empty() -> Self {
        Self {
            mapping: Vec::new(),
            statistics: ConsolidationStatistics {
                original_count: 0,
                final_count: 0,
                consolidation_ratio: 1.0,
                per_category_counts: Vec::new(),
            },
            diagnostics: ConsolidationDiagnostics::default(),
        }
    }

    /// Category assigned to `raw_label`, if the label was part of the input.
    pub fn category_of(&self, raw_label: &str) -> Option<&str> {
        self.mapping
            .iter()
            .find(|m| m.raw_label == raw_label)
            .map(|m| m.canonical_category.as_str())
    }

    /// Raw labels mapped to `category`, in input order.
    pub fn members_of(&self, category: &str) -> Vec<&str> {
        self.mapping
            .iter()
            .filter(|m| m.canonical_category == category)
            .map(|m| m.raw_label.as_str())
            .collect()
    }

    /// Category names in output order.
    pub fn category_names(&self) -> Vec<&str> {
        self.statistics
            .per_category_counts
            .iter()
            .map(|c| c.name.as_str())
            .collect()
    }

    /// blake3 hex digest of the mapping. Identical runs produce identical fingerprints.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for row in &self.mapping {
            hasher.update(row.raw_label.as_bytes());
            hasher.update(&[0x1f]);
            hasher.update(row.canonical_category.as_bytes());
            hasher.update(&[0x1e]);
        }
        hasher.finalize().to_hex().to_string()
    }
}
