//! Phase 1: Ingest. Sum duplicate raw labels, normalize, aggregate frequencies.

use labelfold_core::models::{Label, NormalizedLabel};
use rustc_hash::FxHashMap;

use crate::algorithms::normalizer::normalize;

/// Distinct raw labels and the normalized arena built from them.
#[derive(Debug, Clone, Default)]
pub struct IngestedLabels {
    /// Distinct raw label texts in first-seen input order.
    pub raw_order: Vec<String>,
    /// Distinct normalized labels in first-seen order. Graph nodes are indices into this.
    pub normalized: Vec<NormalizedLabel>,
}

/// Sum duplicate raw strings, then fold raw labels into normalized entries.
pub fn ingest(labels: &[Label]) -> IngestedLabels {
    let mut raw_index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut distinct: Vec<Label> = Vec::new();
    for label in labels {
        match raw_index.get(label.text.as_str()) {
            Some(&i) => {
                distinct[i].frequency = distinct[i].frequency.saturating_add(label.frequency);
            }
            None => {
                raw_index.insert(label.text.as_str(), distinct.len());
                distinct.push(label.clone());
            }
        }
    }

    let raw_order = distinct.iter().map(|l| l.text.clone()).collect();

    let mut normalized_index: FxHashMap<String, usize> = FxHashMap::default();
    let mut normalized: Vec<NormalizedLabel> = Vec::new();
    for label in distinct {
        let key = normalize(&label.text);
        let slot = match normalized_index.get(&key) {
            Some(&i) => i,
            None => {
                normalized_index.insert(key.clone(), normalized.len());
                normalized.push(NormalizedLabel::new(key));
                normalized.len() - 1
            }
        };
        normalized[slot].absorb(label);
    }

    IngestedLabels {
        raw_order,
        normalized,
    }
}
