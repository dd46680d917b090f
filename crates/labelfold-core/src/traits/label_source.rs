use crate::errors::LabelfoldResult;
use crate::models::Label;

/// Supplier of raw labels and their frequencies (e.g., a mailbox fetch).
pub trait ILabelSource {
    /// Fetch a complete snapshot of labels.
    fn fetch_labels(&self) -> LabelfoldResult<Vec<Label>>;

    /// Source name for logs and errors.
    fn name(&self) -> &str;
}
