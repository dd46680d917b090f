use serde::{Deserialize, Serialize};

/// A raw label as observed in the source mailbox, with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// The label text exactly as the source reported it.
    pub text: String,
    /// How many messages carry this label.
    pub frequency: u64,
}

impl Label {
    pub fn new(text: impl Into<String>, frequency: u64) -> Self {
        Self {
            text: text.into(),
            frequency,
        }
    }
}

impl<S: Into<String>> From<(S, u64)> for Label {
    fn from((text, frequency): (S, u64)) -> Self {
        Self::new(text, frequency)
    }
}

/// The normalized form shared by one or more raw labels.
///
/// `frequency` is always the sum of the raw labels' frequencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedLabel {
    /// Normalized text. May be empty for blank raw labels.
    pub text: String,
    /// Aggregate frequency of every raw label folded into this entry.
    pub frequency: u64,
    /// Raw labels that normalize to `text`, in first-seen order.
    pub raw_labels: Vec<Label>,
}

impl NormalizedLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            frequency: 0,
            raw_labels: Vec::new(),
        }
    }

    /// Add a raw label whose normalized form is `self.text`.
    pub fn absorb(&mut self, label: Label) {
        self.frequency = self.frequency.saturating_add(label.frequency);
        self.raw_labels.push(label);
    }
}
