//! Engine-wide constants.

/// Display name of the reserved catch-all bucket created by forced consolidation.
pub const OTHER_CATEGORY_NAME: &str = "Other";

/// Normalized form of a natural label that the catch-all bucket adopts.
pub const OTHER_NORMALIZED_KEY: &str = "other";

/// Display name for a group whose representative label is blank.
pub const BLANK_CATEGORY_NAME: &str = "(blank)";

/// Characters stripped from the end of a label during normalization.
pub const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '-'];

/// Characters that separate words when computing n-grams.
pub const WORD_SEPARATORS: &[char] = &['-', '_'];

/// Character n-gram size for the Jaccard signal.
pub const NGRAM_SIZE: usize = 3;

/// Weight of the edit-distance signal in the blended similarity score.
pub const EDIT_DISTANCE_WEIGHT: f64 = 0.5;

/// Weight of the n-gram Jaccard signal in the blended similarity score.
pub const NGRAM_WEIGHT: f64 = 0.5;

/// Upper bound on normalization passes while searching for a fixpoint.
pub const MAX_NORMALIZE_PASSES: usize = 4;

/// Slack applied to the pruning bound so float rounding never drops a real pair.
pub const PRUNE_EPSILON: f64 = 1e-9;

/// Share of raw labels in the catch-all bucket above which a run is flagged.
pub const OTHER_BUCKET_WARNING_SHARE: f64 = 0.5;
