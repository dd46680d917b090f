use crate::errors::LabelfoldResult;
use crate::models::{ConsolidationResult, Label};

/// Label consolidation: reducing raw labels to a bounded set of categories.
pub trait ILabelConsolidator: Send + Sync {
    /// Consolidate a snapshot of raw labels.
    fn consolidate(&self, labels: &[Label]) -> LabelfoldResult<ConsolidationResult>;
}
