//! Crate-wide error aggregating subsystem errors via `From` conversions.

use super::error_code::{self, ErrorCode};
use super::ConfigError;

/// Top-level error for labelfold operations.
#[derive(Debug, thiserror::Error)]
pub enum LabelfoldError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("label source {source_name} unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },
}

impl ErrorCode for LabelfoldError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::SourceUnavailable { .. } => error_code::SOURCE_ERROR,
        }
    }
}

pub type LabelfoldResult<T> = Result<T, LabelfoldError>;
