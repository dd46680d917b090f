//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Environment variable holding per-module filter directives.
pub const LOG_ENV_VAR: &str = "LABELFOLD_LOG";

/// Initialize the labelfold tracing/logging system with default settings.
///
/// Reads `LABELFOLD_LOG` for per-module log levels.
/// Format: `LABELFOLD_LOG=labelfold_consolidation=debug,labelfold_core=warn`
///
/// Falls back to `labelfold=info` if `LABELFOLD_LOG` is not set or is invalid.
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with_config(&ObservabilityConfig::default());
}

/// Initialize tracing using the observability section of the config.
///
/// `LABELFOLD_LOG` still wins over `log_level` when it is set.
pub fn init_tracing_with_config(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let fallback = format!("labelfold={}", config.log_level);
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback));

        if config.json_logs {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().json().with_target(true))
                .with(filter)
                .try_init();
        } else {
            let _ = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init();
        }
    });
}
