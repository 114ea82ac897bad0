//! Copy/cut clipboard.
//!
//! Holds the pending operation, the directory the items came from and the
//! items themselves until a paste succeeds.

use crate::core::error::ValidationError;
use crate::models::{ClipboardOp, FileEntry, PasteRequest};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clipboard {
    op: Option<ClipboardOp>,
    source_path: String,
    items: Vec<FileEntry>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(&self) -> Option<ClipboardOp> {
        self.op
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn items(&self) -> &[FileEntry] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.op.is_none() || self.items.is_empty()
    }

    /// Store `items` for a later paste. Repeating the pending operation
    /// clears the clipboard instead. Returns the resulting operation.
    pub fn set(
        &mut self,
        op: ClipboardOp,
        source_path: &str,
        items: Vec<FileEntry>,
    ) -> Result<Option<ClipboardOp>, ValidationError> {
        if self.op == Some(op) {
            self.clear();
            return Ok(None);
        }
        if items.is_empty() {
            return Err(ValidationError::NoSelection);
        }
        self.op = Some(op);
        self.source_path = source_path.to_string();
        self.items = items;
        Ok(self.op)
    }

    pub fn validate_paste(&self, destination: &str) -> Result<ClipboardOp, ValidationError> {
        let op = match self.op {
            Some(op) if !self.items.is_empty() => op,
            _ => return Err(ValidationError::NothingToPaste),
        };
        if self.source_path == destination {
            return Err(ValidationError::PasteIntoSource);
        }
        Ok(op)
    }

    pub fn paste_request(&self, destination: &str) -> Result<PasteRequest, ValidationError> {
        let operation = self.validate_paste(destination)?;
        Ok(PasteRequest {
            operation,
            source_path: self.source_path.clone(),
            destination_path: destination.to_string(),
            items: self.items.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::sample_entries;

    #[test]
    fn test_set_and_paste_request() {
        let mut clip = Clipboard::new();
        let items = sample_entries(2);
        assert_eq!(
            clip.set(ClipboardOp::Cut, "C:\\a", items.clone()),
            Ok(Some(ClipboardOp::Cut))
        );

        let req = clip.paste_request("C:\\b").unwrap();
        assert_eq!(req.operation, ClipboardOp::Cut);
        assert_eq!(req.source_path, "C:\\a");
        assert_eq!(req.destination_path, "C:\\b");
        assert_eq!(req.items, items);
    }

    #[test]
    fn test_same_op_toggles_off() {
        let mut clip = Clipboard::new();
        clip.set(ClipboardOp::Copy, "C:\\a", sample_entries(1)).unwrap();
        assert_eq!(clip.set(ClipboardOp::Copy, "C:\\a", sample_entries(1)), Ok(None));
        assert!(clip.is_empty());

        // Switching op replaces
        clip.set(ClipboardOp::Copy, "C:\\a", sample_entries(1)).unwrap();
        clip.set(ClipboardOp::Cut, "C:\\x", sample_entries(3)).unwrap();
        assert_eq!(clip.op(), Some(ClipboardOp::Cut));
        assert_eq!(clip.items().len(), 3);
        assert_eq!(clip.source_path(), "C:\\x");
    }

    #[test]
    fn test_rejections() {
        let mut clip = Clipboard::new();
        assert_eq!(clip.validate_paste("C:\\b"), Err(ValidationError::NothingToPaste));
        assert_eq!(
            clip.set(ClipboardOp::Copy, "C:\\a", Vec::new()),
            Err(ValidationError::NoSelection)
        );

        clip.set(ClipboardOp::Copy, "C:\\a", sample_entries(1)).unwrap();
        assert_eq!(clip.validate_paste("C:\\a"), Err(ValidationError::PasteIntoSource));
    }
}
