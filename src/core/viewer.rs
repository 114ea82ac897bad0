//! In-app media viewer.
//!
//! Images and videos open over the file view instead of in a new tab. The
//! viewer remembers which dataset index it shows; stepping skips every entry
//! that is neither an image nor a video, and stops at either end of the
//! listing.

use crate::models::{EntryKind, FileEntry};
use crate::utils::url::file_url;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn of(entry: &FileEntry) -> Option<Self> {
        match entry.category() {
            EntryKind::Image => Some(Self::Image),
            EntryKind::Video => Some(Self::Video),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

/// What the viewer overlay displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaItem {
    pub index: usize,
    pub name: String,
    pub url: String,
    pub kind: MediaKind,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Default)]
pub struct MediaViewer {
    current: Option<usize>,
}

impl MediaViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn index(&self) -> Option<usize> {
        self.current
    }

    /// Show the entry at `index`. Returns `None` (and leaves the viewer
    /// unchanged) when it is not an image or a video.
    pub fn open(&mut self, entries: &[FileEntry], index: usize) -> Option<MediaItem> {
        let entry = entries.get(index)?;
        MediaKind::of(entry)?;
        self.current = Some(index);
        self.item(entries)
    }

    /// Move to the nearest media entry in `step`'s direction.
    ///
    /// Returns the new index, or `None` when nothing lies that way.
    pub fn step(&mut self, entries: &[FileEntry], step: Step) -> Option<usize> {
        let target = neighbour(entries, self.current?, step)?;
        self.current = Some(target);
        Some(target)
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn item(&self, entries: &[FileEntry]) -> Option<MediaItem> {
        let index = self.current?;
        let entry = entries.get(index)?;
        Some(MediaItem {
            index,
            name: entry.name.clone(),
            url: file_url(&entry.full_path()),
            kind: MediaKind::of(entry)?,
            has_previous: neighbour(entries, index, Step::Previous).is_some(),
            has_next: neighbour(entries, index, Step::Next).is_some(),
        })
    }
}

fn neighbour(entries: &[FileEntry], from: usize, step: Step) -> Option<usize> {
    let is_media = |i: &usize| entries.get(*i).and_then(MediaKind::of).is_some();
    match step {
        Step::Previous => (0..from.min(entries.len())).rev().find(is_media),
        Step::Next => (from + 1..entries.len()).find(is_media),
    }
}
