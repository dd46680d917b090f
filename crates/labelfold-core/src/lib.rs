//! # labelfold-core
//!
//! Foundation crate for the labelfold label consolidation engine.
//! Defines the label and group models, result types, traits, errors, config,
//! tracing setup, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::{ClusteringMethod, ConsolidationConfig, LabelfoldConfig};
pub use errors::{ConfigError, LabelfoldError, LabelfoldResult};
pub use models::{
    ConsolidationDiagnostics, ConsolidationResult, ConsolidationStatistics, Label, LabelGroup,
    LabelMapping, NormalizedLabel,
};
