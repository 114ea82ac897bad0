//! Back/forward history with branch truncation.
//!
//! The stack is never empty and its cursor always points at an entry.
//! Pushing from a cursor below the tip discards every entry after the
//! cursor before appending, the way browser history does.

/// One visited view: a directory, or search results inside a directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryEntry {
    pub location: String,
    /// Empty when browsing; the query when this entry shows search results.
    pub search_term: String,
    /// Top-visible index saved when the entry was left.
    pub scroll_anchor: usize,
}

impl HistoryEntry {
    pub fn browse(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Default::default()
        }
    }

    pub fn search(location: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            search_term: term.into(),
            scroll_anchor: 0,
        }
    }

    pub fn is_search(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Same location and query, ignoring the saved anchor.
    pub fn same_view(&self, other: &HistoryEntry) -> bool {
        self.location == other.location && self.search_term == other.search_term
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl HistoryStack {
    pub fn new(initial: HistoryEntry) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn can_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Truncate after the cursor, append `entry` and move onto it.
    ///
    /// Returns `false` (and changes nothing) when `entry` shows the same view
    /// as the current entry.
    pub fn push(&mut self, entry: HistoryEntry) -> bool {
        if self.current().same_view(&entry) {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
        true
    }

    pub fn move_to(&mut self, index: usize) -> bool {
        if index >= self.entries.len() || index == self.cursor {
            return false;
        }
        self.cursor = index;
        true
    }

    pub fn set_anchor(&mut self, index: usize, anchor: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.scroll_anchor = anchor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(locations: &[&str]) -> HistoryStack {
        let mut s = HistoryStack::new(HistoryEntry::browse(locations[0]));
        for loc in &locations[1..] {
            s.push(HistoryEntry::browse(*loc));
        }
        s
    }

    fn locations(s: &HistoryStack) -> Vec<&str> {
        s.entries().iter().map(|e| e.location.as_str()).collect()
    }

    #[test]
    fn test_push_at_tip_appends() {
        let mut s = stack(&["A", "B", "C"]);
        assert_eq!(s.cursor(), 2);
        s.push(HistoryEntry::browse("D"));
        assert_eq!(locations(&s), vec!["A", "B", "C", "D"]);
        assert_eq!(s.cursor(), 3);
    }

    #[test]
    fn test_back_then_push_truncates() {
        let mut s = stack(&["A", "B", "C"]);
        assert!(s.move_to(1));
        s.push(HistoryEntry::browse("E"));
        assert_eq!(locations(&s), vec!["A", "B", "E"]);
        assert_eq!(s.cursor(), 2);
        assert!(!s.can_forward());
    }

    #[test]
    fn test_push_same_view_is_noop() {
        let mut s = stack(&["A", "B"]);
        assert!(!s.push(HistoryEntry::browse("B")));
        assert_eq!(s.len(), 2);
        // Search results in the same directory are a different view
        assert!(s.push(HistoryEntry::search("B", "cat")));
        assert_eq!(s.len(), 3);
        assert!(s.current().is_search());
    }

    #[test]
    fn test_boundaries() {
        let mut s = stack(&["A"]);
        assert!(!s.can_back());
        assert!(!s.can_forward());
        assert!(!s.move_to(1));
        assert!(!s.move_to(0));
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_anchor_saved_per_entry() {
        let mut s = stack(&["A", "B"]);
        s.set_anchor(0, 42);
        s.move_to(0);
        assert_eq!(s.current().scroll_anchor, 42);
        assert_eq!(s.get(1).map(|e| e.scroll_anchor), Some(0));
    }
}
