//! Observability system for labelfold.
//! `tracing` crate with `EnvFilter`, per-module log levels.

pub mod setup;

pub use setup::{init_tracing, init_tracing_with_config, LOG_ENV_VAR};
