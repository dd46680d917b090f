//! Test fixture loader for labelfold golden scenarios and synthetic label sets.
//!
//! Golden JSON files live under the workspace-level `test-fixtures/golden/`
//! directory. Synthetic generators are deterministic so benchmarks and
//! property tests see the same inputs on every run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use labelfold_core::errors::{LabelfoldError, LabelfoldResult};
use labelfold_core::models::Label;
use labelfold_core::traits::ILabelSource;
use labelfold_core::ClusteringMethod;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // Walk up until a directory holding `test-fixtures/golden/consolidation`
    // is found. The crate itself is also named `test-fixtures`, so a shallower
    // match would stop one level too early.
    while !path.join("test-fixtures").join("golden").join("consolidation").is_dir() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/golden/consolidation from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Relative paths of every JSON file in a fixture subdirectory, sorted.
pub fn list_fixtures(subdir: &str) -> Vec<String> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<String> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let name = path.file_name()?.to_str()?.to_string();
                Some(format!("{subdir}/{name}"))
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// A golden consolidation scenario: one label snapshot, several configs.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub labels: Vec<Label>,
    pub cases: Vec<GoldenCase>,
}

/// One config and the exact result it must produce.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenCase {
    pub max_categories: usize,
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,
    #[serde(default)]
    pub clustering_method: ClusteringMethod,
    /// Categories in output order.
    pub expected_categories: Vec<ExpectedCategory>,
    /// Raw label → category. May list only a subset of the input.
    #[serde(default)]
    pub expected_mapping: BTreeMap<String, String>,
}

fn default_threshold() -> f64 {
    0.8
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpectedCategory {
    pub name: String,
    pub label_count: usize,
    pub frequency: u64,
}

/// Load every scenario under `golden/consolidation/`.
pub fn golden_scenarios() -> Vec<GoldenScenario> {
    list_fixtures("golden/consolidation")
        .iter()
        .map(|path| load_fixture(path))
        .collect()
}

/// Fixed snapshot source. Optionally fails, to exercise error propagation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLabelSource {
    name: String,
    labels: Vec<Label>,
    unavailable: Option<String>,
}

impl InMemoryLabelSource {
    pub fn new(name: impl Into<String>, labels: Vec<Label>) -> Self {
        Self {
            name: name.into(),
            labels,
            unavailable: None,
        }
    }

    /// A source whose every fetch fails with `reason`.
    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: Vec::new(),
            unavailable: Some(reason.into()),
        }
    }
}

impl ILabelSource for InMemoryLabelSource {
    fn fetch_labels(&self) -> LabelfoldResult<Vec<Label>> {
        match &self.unavailable {
            Some(reason) => Err(LabelfoldError::SourceUnavailable {
                source_name: self.name.clone(),
                reason: reason.clone(),
            }),
            None => Ok(self.labels.clone()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Forty words with no pairwise similarity above 0.4.
pub const DISTINCT_WORDS: [&str; 40] = [
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliet",
    "kilo", "lima", "mike", "november", "oscar", "papa", "quebec", "romeo", "sierra", "tango",
    "uniform", "victor", "whiskey", "xray", "yankee", "zulu", "amber", "cobalt", "crimson",
    "denim", "ivory", "jade", "khaki", "lemon", "magenta", "navy", "olive", "pearl", "quartz",
    "ruby",
];

/// The first `n` distinct words, capitalized, with frequency `i + 1`.
///
/// # Panics
/// Panics if `n` exceeds the word list.
pub fn distinct_labels(n: usize) -> Vec<Label> {
    assert!(n <= DISTINCT_WORDS.len(), "only {} distinct words", DISTINCT_WORDS.len());
    DISTINCT_WORDS
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, word)| Label::new(capitalize(word), i as u64 + 1))
        .collect()
}

const TOPICS: [&str; 16] = [
    "receipts", "travel", "newsletters", "invoices", "family", "taxes", "bank statements",
    "job search", "kids school", "follow up", "projects", "shopping", "medical", "insurance",
    "subscriptions", "volunteering",
];

/// `n` distinct raw labels over a handful of topics, with case, separator,
/// and punctuation noise. Deterministic.
pub fn synthetic_labels(n: usize) -> Vec<Label> {
    let t = TOPICS.len();
    (0..n)
        .map(|i| {
            let topic = TOPICS[i % t];
            let round = i / t;
            let g = round / 4;
            let text = match round % 4 {
                0 => format!("{} {g}", capitalize(topic)),
                1 => format!("{}-{g}", topic.replace(' ', "-")),
                2 => format!("{}_{g}s", topic.replace(' ', "_")),
                _ => format!("{} {g}.", topic.to_uppercase()),
            };
            Label::new(text, (i as u64 * 7919) % 97 + 1)
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
