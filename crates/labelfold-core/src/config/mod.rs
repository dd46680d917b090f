//! Configuration system for labelfold.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod consolidation_config;
pub mod defaults;
pub mod observability_config;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use consolidation_config::{ClusteringMethod, ConsolidationConfig};
pub use observability_config::ObservabilityConfig;

use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `ConfigOverrides`)
/// 2. Environment variables (`LABELFOLD_*`)
/// 3. Project config (`labelfold.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LabelfoldConfig {
    pub consolidation: ConsolidationConfig,
    pub observability: ObservabilityConfig,
}

/// Caller-supplied overrides, the highest-priority layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_categories: Option<usize>,
    pub similarity_threshold: Option<f64>,
    pub clustering_method: Option<ClusteringMethod>,
    pub min_merge_similarity: Option<f64>,
}

impl LabelfoldConfig {
    /// Load configuration with layered resolution and validate the result.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(defaults::PROJECT_CONFIG_FILENAME);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            debug!(path = %project_config_path.display(), "no project config, using defaults");
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        config.validate()?;
        if config.consolidation.hierarchical_floor_is_inert() {
            warn!(
                min_merge_similarity = config.consolidation.min_merge_similarity,
                similarity_threshold = config.consolidation.similarity_threshold,
                "min_merge_similarity is not below similarity_threshold, hierarchical reduction will never merge"
            );
        }
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing sections keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.consolidation.validate()
    }

    /// Apply environment overrides read through `lookup`.
    /// Pattern: `LABELFOLD_MAX_CATEGORIES`, `LABELFOLD_SIMILARITY_THRESHOLD`, etc.
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", defaults::ENV_PREFIX, name));

        if let Some(val) = var("MAX_CATEGORIES") {
            match val.parse::<usize>() {
                Ok(v) => self.consolidation.max_categories = v,
                Err(_) => warn!(value = %val, "ignoring invalid LABELFOLD_MAX_CATEGORIES"),
            }
        }
        if let Some(val) = var("SIMILARITY_THRESHOLD") {
            match val.parse::<f64>() {
                Ok(v) => self.consolidation.similarity_threshold = v,
                Err(_) => warn!(value = %val, "ignoring invalid LABELFOLD_SIMILARITY_THRESHOLD"),
            }
        }
        if let Some(val) = var("CLUSTERING_METHOD") {
            match val.parse::<ClusteringMethod>() {
                Ok(v) => self.consolidation.clustering_method = v,
                Err(_) => warn!(value = %val, "ignoring invalid LABELFOLD_CLUSTERING_METHOD"),
            }
        }
        if let Some(val) = var("MIN_MERGE_SIMILARITY") {
            match val.parse::<f64>() {
                Ok(v) => self.consolidation.min_merge_similarity = v,
                Err(_) => warn!(value = %val, "ignoring invalid LABELFOLD_MIN_MERGE_SIMILARITY"),
            }
        }
    }

    /// Apply caller overrides on top of the current values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.max_categories {
            self.consolidation.max_categories = v;
        }
        if let Some(v) = overrides.similarity_threshold {
            self.consolidation.similarity_threshold = v;
        }
        if let Some(v) = overrides.clustering_method {
            self.consolidation.clustering_method = v;
        }
        if let Some(v) = overrides.min_merge_similarity {
            self.consolidation.min_merge_similarity = v;
        }
    }
}
