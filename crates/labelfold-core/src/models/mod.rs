//! Data models: labels, groups, and consolidation results.

pub mod consolidation_result;
pub mod diagnostics;
pub mod label;
pub mod label_group;

pub use consolidation_result::{
    CategorySummary, ConsolidationResult, ConsolidationStatistics, LabelMapping,
};
pub use diagnostics::ConsolidationDiagnostics;
pub use label::{Label, NormalizedLabel};
pub use label_group::LabelGroup;
