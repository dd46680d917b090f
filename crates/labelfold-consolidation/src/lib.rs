//! # labelfold-consolidation
//!
//! Label consolidation pipeline: ingest → duplicate grouping → hierarchical
//! reduction → forced folding → canonical naming.
//! Always produces a result within the configured category budget.

pub mod algorithms;
pub mod engine;
pub mod pipeline;

pub use algorithms::normalizer::normalize;
pub use algorithms::similarity::similarity;
pub use engine::{consolidate, ConsolidationEngine};
