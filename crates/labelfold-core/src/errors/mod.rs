//! Error handling for labelfold.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod labelfold_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use labelfold_error::{LabelfoldError, LabelfoldResult};
