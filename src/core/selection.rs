//! Selected dataset indices.
//!
//! Selection is stored by index, never by node, so it is unaffected by which
//! nodes happen to be materialized.

use std::collections::BTreeSet;

use crate::models::FileEntry;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionStore {
    indices: BTreeSet<usize>,
    multi_select: bool,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multi_select(&self) -> bool {
        self.multi_select
    }

    /// Switch multi-select mode. Leaving it clears the selection.
    pub fn set_multi_select(&mut self, enabled: bool) {
        self.multi_select = enabled;
        if !enabled {
            self.indices.clear();
        }
    }

    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.indices.remove(&index) {
            self.indices.insert(index);
            return true;
        }
        false
    }

    pub fn select_only(&mut self, index: usize) {
        self.indices.clear();
        self.indices.insert(index);
    }

    /// Click on an item: toggle in multi-select mode, replace otherwise.
    pub fn apply_click(&mut self, index: usize) {
        if self.multi_select {
            self.toggle(index);
        } else {
            self.select_only(index);
        }
    }

    pub fn select_all(&mut self, len: usize) {
        self.multi_select = true;
        self.indices = (0..len).collect();
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    /// Drop every index not below `len`.
    pub fn prune(&mut self, len: usize) {
        self.indices.retain(|&i| i < len);
    }

    /// Selected entries of `entries`, in index order.
    pub fn selected_entries(&self, entries: &[FileEntry]) -> Vec<FileEntry> {
        self.indices
            .iter()
            .filter_map(|&i| entries.get(i).cloned())
            .collect()
    }
}
