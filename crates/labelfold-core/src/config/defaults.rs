// Single source of truth for all default values.

// --- Consolidation ---
pub const DEFAULT_MAX_CATEGORIES: usize = 25;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_MIN_MERGE_SIMILARITY: f64 = 0.5;
pub const DEFAULT_PARALLEL: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;

// --- Files & environment ---
pub const PROJECT_CONFIG_FILENAME: &str = "labelfold.toml";
pub const ENV_PREFIX: &str = "LABELFOLD_";
