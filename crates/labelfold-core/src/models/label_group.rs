use serde::{Deserialize, Serialize};

use super::label::{Label, NormalizedLabel};

/// A set of normalized labels judged equivalent or closely related.
///
/// Groups are created by duplicate grouping, merged by the hierarchical and
/// forced phases, and finalized once `canonical_name` is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelGroup {
    /// Member labels. A normalized label belongs to exactly one group.
    pub members: Vec<NormalizedLabel>,
    /// Sum of member frequencies.
    pub frequency: u64,
    /// Display name, set by the namer.
    pub canonical_name: Option<String>,
    /// True for the reserved catch-all bucket.
    pub is_other: bool,
}

impl LabelGroup {
    /// A group holding a single normalized label.
    pub fn singleton(label: NormalizedLabel) -> Self {
        Self::from_members(vec![label])
    }

    pub fn from_members(members: Vec<NormalizedLabel>) -> Self {
        let frequency = members
            .iter()
            .fold(0u64, |acc, m| acc.saturating_add(m.frequency));
        Self {
            members,
            frequency,
            canonical_name: None,
            is_other: false,
        }
    }

    /// An empty catch-all bucket.
    pub fn other_bucket() -> Self {
        Self {
            members: Vec::new(),
            frequency: 0,
            canonical_name: None,
            is_other: true,
        }
    }

    /// Move every member of `other` into `self`.
    pub fn absorb(&mut self, mut other: LabelGroup) {
        self.frequency = self.frequency.saturating_add(other.frequency);
        self.members.append(&mut other.members);
    }

    /// Every raw label the group subsumes.
    pub fn raw_labels(&self) -> impl Iterator<Item = &Label> {
        self.members.iter().flat_map(|m| m.raw_labels.iter())
    }

    pub fn raw_label_count(&self) -> usize {
        self.members.iter().map(|m| m.raw_labels.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True if any member normalizes to `text`.
    pub fn contains_normalized(&self, text: &str) -> bool {
        self.members.iter().any(|m| m.text == text)
    }
}
