use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Strategy used once duplicate grouping leaves more groups than the budget allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusteringMethod {
    /// Duplicate grouping, then agglomerative merging, then forced folding.
    #[default]
    Hierarchical,
    /// Duplicate grouping, then forced folding. No agglomerative step.
    GraphOnly,
}

impl ClusteringMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hierarchical => "hierarchical",
            Self::GraphOnly => "graph-only",
        }
    }
}

impl fmt::Display for ClusteringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusteringMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hierarchical" => Ok(Self::Hierarchical),
            "graph-only" | "graph_only" => Ok(Self::GraphOnly),
            other => Err(ConfigError::invalid(
                "consolidation.clustering_method",
                format!("unknown method '{other}', expected 'hierarchical' or 'graph-only'"),
            )),
        }
    }
}

/// Consolidation subsystem configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Hard upper bound on the number of output categories. Must be >= 1.
    pub max_categories: usize,
    /// Minimum similarity for two labels to be linked as duplicates.
    pub similarity_threshold: f64,
    /// How groups are reduced once duplicate grouping is done.
    pub clustering_method: ClusteringMethod,
    /// Minimum single-linkage similarity for an agglomerative merge.
    /// Group pairs below it are never merged hierarchically.
    pub min_merge_similarity: f64,
    /// Compute pairwise similarities on the rayon pool.
    pub parallel: bool,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            max_categories: defaults::DEFAULT_MAX_CATEGORIES,
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            clustering_method: ClusteringMethod::default(),
            min_merge_similarity: defaults::DEFAULT_MIN_MERGE_SIMILARITY,
            parallel: defaults::DEFAULT_PARALLEL,
        }
    }
}

impl ConsolidationConfig {
    /// Builder-style override of `max_categories`.
    pub fn with_max_categories(mut self, max_categories: usize) -> Self {
        self.max_categories = max_categories;
        self
    }

    /// Builder-style override of `similarity_threshold`.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Builder-style override of `clustering_method`.
    pub fn with_clustering_method(mut self, method: ClusteringMethod) -> Self {
        self.clustering_method = method;
        self
    }

    /// Builder-style override of `min_merge_similarity`.
    pub fn with_min_merge_similarity(mut self, similarity: f64) -> Self {
        self.min_merge_similarity = similarity;
        self
    }

    /// Builder-style override of `parallel`.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate every field. NaN thresholds are rejected.
    ///
    /// A `min_merge_similarity` at or above `similarity_threshold` is
    /// accepted but leaves hierarchical reduction with nothing to merge;
    /// see [`Self::hierarchical_floor_is_inert`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_categories < 1 {
            return Err(ConfigError::invalid(
                "consolidation.max_categories",
                format!("must be at least 1, got {}", self.max_categories),
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::invalid(
                "consolidation.similarity_threshold",
                format!("must be between 0.0 and 1.0, got {}", self.similarity_threshold),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_merge_similarity) {
            return Err(ConfigError::invalid(
                "consolidation.min_merge_similarity",
                format!("must be between 0.0 and 1.0, got {}", self.min_merge_similarity),
            ));
        }
        Ok(())
    }

    /// True when hierarchical reduction can never merge anything: every pair
    /// at or above `min_merge_similarity` was already joined during grouping.
    pub fn hierarchical_floor_is_inert(&self) -> bool {
        self.clustering_method == ClusteringMethod::Hierarchical
            && self.min_merge_similarity >= self.similarity_threshold
    }
}
