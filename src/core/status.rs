//! Status bar summary.

use crate::core::selection::SelectionStore;
use crate::models::FileEntry;
use crate::utils::format::{format_size, parse_size};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: usize,
    pub selected: usize,
    /// Formatted sum of the selected entries' sizes; empty when nothing
    /// selected has a size.
    pub selected_size: String,
}

impl StatusSummary {
    pub fn compute(entries: &[FileEntry], selection: &SelectionStore) -> Self {
        let mut bytes = 0u64;
        let mut sized = false;
        for index in selection.indices() {
            if let Some(size) = entries.get(index).and_then(|e| parse_size(&e.size)) {
                bytes = bytes.saturating_add(size);
                sized = true;
            }
        }
        Self {
            total: entries.len(),
            selected: selection.len(),
            selected_size: if sized { format_size(bytes) } else { String::new() },
        }
    }
}
