//! ConsolidationEngine: validated config + `ILabelConsolidator` entry point.

use labelfold_core::config::ConsolidationConfig;
use labelfold_core::errors::{ConfigError, LabelfoldResult};
use labelfold_core::models::{ConsolidationResult, Label};
use labelfold_core::traits::{ILabelConsolidator, ILabelSource};
use tracing::info;

use crate::pipeline;

/// The main consolidation engine.
///
/// Holds a config that has already passed validation, so every call to
/// `consolidate` succeeds. Stateless between runs; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ConsolidationEngine {
    config: ConsolidationConfig,
}

impl ConsolidationEngine {
    /// Create an engine, rejecting invalid configuration up front.
    pub fn new(config: ConsolidationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConsolidationConfig {
        &self.config
    }

    /// Consolidate a snapshot of labels.
    pub fn run(&self, labels: &[Label]) -> ConsolidationResult {
        let result = pipeline::run_pipeline(labels, &self.config);
        info!(
            original = result.statistics.original_count,
            categories = result.statistics.final_count,
            ratio = result.statistics.consolidation_ratio,
            "consolidation complete"
        );
        result
    }

    /// Fetch a snapshot from `source` and consolidate it.
    pub fn consolidate_from(&self, source: &dyn ILabelSource) -> LabelfoldResult<ConsolidationResult> {
        let labels = source.fetch_labels()?;
        info!(source = source.name(), labels = labels.len(), "fetched labels");
        Ok(self.run(&labels))
    }
}

impl ILabelConsolidator for ConsolidationEngine {
    fn consolidate(&self, labels: &[Label]) -> LabelfoldResult<ConsolidationResult> {
        Ok(self.run(labels))
    }
}

/// Validate `config` and consolidate `labels` in one call.
pub fn consolidate(
    labels: &[Label],
    config: &ConsolidationConfig,
) -> Result<ConsolidationResult, ConfigError> {
    Ok(ConsolidationEngine::new(config.clone())?.run(labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelfold_core::errors::LabelfoldError;

    struct FailingSource;

    impl ILabelSource for FailingSource {
        fn fetch_labels(&self) -> LabelfoldResult<Vec<Label>> {
            Err(LabelfoldError::SourceUnavailable {
                source_name: self.name().to_string(),
                reason: "connection reset".to_string(),
            })
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let config = ConsolidationConfig::default().with_max_categories(0);
        assert!(matches!(
            ConsolidationEngine::new(config.clone()),
            Err(ConfigError::ValidationFailed { .. })
        ));
        assert!(consolidate(&[Label::new("News", 1)], &config).is_err());
    }

    #[test]
    fn trait_and_free_function_agree() {
        let labels = vec![Label::new("Work", 5), Label::new("work", 3), Label::new("Personal", 2)];
        let engine = ConsolidationEngine::default();
        let via_trait = engine.consolidate(&labels).unwrap();
        let via_fn = consolidate(&labels, engine.config()).unwrap();
        assert_eq!(via_trait, via_fn);
        assert_eq!(via_trait.statistics.final_count, 2);
    }

    #[test]
    fn source_errors_propagate() {
        let engine = ConsolidationEngine::default();
        let err = engine.consolidate_from(&FailingSource).unwrap_err();
        assert!(matches!(err, LabelfoldError::SourceUnavailable { .. }));
    }
}
