//! Seams between the engine and its collaborators.

pub mod consolidator;
pub mod label_source;

pub use consolidator::ILabelConsolidator;
pub use label_source::ILabelSource;
