//! Details of the focused entry.
//!
//! Every entry shows its name, type tag, modification time, size and a
//! preview: the backend thumbnail for images and videos, the static icon for
//! everything else. Names shaped `artist#character#copyright#source#rest`
//! additionally carry artwork tags. Any other number of `#` means the name
//! carries nothing.

use crate::config::endpoints;
use crate::models::{EntryKind, FileEntry};
use crate::utils::url::encode_uri_component;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryDetails {
    pub name: String,
    pub kind: String,
    pub modified: String,
    pub size: String,
    /// Image source for the preview.
    pub preview: String,
    pub artwork: Option<ArtworkDetails>,
}

impl EntryDetails {
    pub fn of(entry: &FileEntry) -> Self {
        let preview = match entry.category() {
            EntryKind::Image | EntryKind::Video => format!(
                "{}{}",
                endpoints::THUMBNAIL,
                encode_uri_component(&entry.full_path())
            ),
            kind => kind.static_icon().to_string(),
        };
        Self {
            name: entry.name.clone(),
            kind: entry.kind.clone(),
            modified: entry.modified.clone(),
            size: entry.size.clone(),
            preview,
            artwork: ArtworkDetails::parse(&entry.name),
        }
    }

    /// Labelled common fields in display order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Name", self.name.as_str()),
            ("Type", self.kind.as_str()),
            ("Modified", self.modified.as_str()),
            ("Size", self.size.as_str()),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtworkDetails {
    pub artist: String,
    pub character: String,
    pub copyright: String,
    pub source: String,
}

impl ArtworkDetails {
    pub fn parse(name: &str) -> Option<Self> {
        let parts: Vec<&str> = name.split('#').collect();
        let [artist, character, copyright, source, _rest] = parts.as_slice() else {
            return None;
        };
        Some(Self {
            artist: artist.trim().to_string(),
            character: character.trim().to_string(),
            copyright: copyright.trim().to_string(),
            source: source.trim().to_string(),
        })
    }

    /// Labelled, non-empty fields in display order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Artist", self.artist.as_str()),
            ("Character", self.character.as_str()),
            ("Copyright", self.copyright.as_str()),
            ("Source", self.source.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_four_separators() {
        let details = ArtworkDetails::parse("alice#miku#vocaloid#pixiv#123.png").unwrap();
        assert_eq!(details.artist, "alice");
        assert_eq!(details.character, "miku");
        assert_eq!(details.copyright, "vocaloid");
        assert_eq!(details.source, "pixiv");
    }

    #[test]
    fn test_other_shapes_have_no_details() {
        assert_eq!(ArtworkDetails::parse("plain.png"), None);
        assert_eq!(ArtworkDetails::parse("a#b#c#d.png"), None);
        assert_eq!(ArtworkDetails::parse("a#b#c#d#e#f.png"), None);
    }

    fn entry(name: &str, kind: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: "C:\\pics".to_string(),
            kind: kind.to_string(),
            modified: "2024-01-02 03:04".to_string(),
            size: "2.00KB".to_string(),
            ..FileEntry::default()
        }
    }

    #[test]
    fn test_image_preview_uses_thumbnail_of_full_path() {
        let details = EntryDetails::of(&entry("a b.png", "png"));
        assert_eq!(details.preview, "/get_thumbnail/C%3A%5Cpics%5Ca%20b.png");
        assert_eq!(details.artwork, None);
    }

    #[test]
    fn test_plain_file_details() {
        let details = EntryDetails::of(&entry("notes.txt", "txt"));
        assert_eq!(details.preview, EntryKind::Document.static_icon());
        assert_eq!(
            details.fields(),
            [
                ("Name", "notes.txt"),
                ("Type", "txt"),
                ("Modified", "2024-01-02 03:04"),
                ("Size", "2.00KB"),
            ]
        );
    }

    #[test]
    fn test_fields_skip_empty() {
        let details = ArtworkDetails::parse("alice##x##1.png").unwrap();
        let labels: Vec<_> = details.fields().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Artist", "Copyright"]);
    }
}
