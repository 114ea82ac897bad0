//! Directory listing entries as returned by the backend.

use serde::{Deserialize, Serialize};

use crate::config::{endpoints, file_types, static_icons};
use crate::models::ViewMode;
use crate::utils::format::normalize_slashes;
use crate::utils::url::encode_uri_component;

/// Backend type tag for directories.
pub const FOLDER_TAG: &str = "文件夹";

/// Backend type tag for disks listed at the virtual root.
pub const DISK_TAG: &str = "本地磁盘";

/// One row of a directory listing.
///
/// Entries are immutable once received; a listing is replaced wholesale on
/// navigation and never edited in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    /// Directory containing the entry (empty for disks).
    #[serde(default)]
    pub path: String,
    /// Category tag: folder, disk, or the lowercase file extension.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub modified: String,
    /// Pre-formatted size, e.g. `"1.50KB"` or `"-"`.
    #[serde(default)]
    pub size: String,
    /// Thumbnail source for images (full path on the backend host).
    #[serde(default)]
    pub icon: String,
}

impl FileEntry {
    pub fn category(&self) -> EntryKind {
        EntryKind::from_tag(&self.kind)
    }

    pub fn is_container(&self) -> bool {
        matches!(self.category(), EntryKind::Folder | EntryKind::Disk)
    }

    /// Full normalized path of the entry (`path\name`).
    pub fn full_path(&self) -> String {
        match self.category() {
            EntryKind::Disk => self.name.clone(),
            _ => normalize_slashes(&format!("{}\\{}", self.path, self.name)),
        }
    }

    pub fn static_icon(&self) -> &'static str {
        self.category().static_icon()
    }

    /// Cache key of the thumbnail shown for this entry in `mode`.
    ///
    /// List rows only ever show static icons. Images are addressed by their
    /// icon key, videos by their full path.
    pub fn thumbnail_key(&self, mode: ViewMode) -> Option<String> {
        if !mode.is_grid() {
            return None;
        }
        match self.category() {
            EntryKind::Image if !self.icon.is_empty() => Some(format!(
                "{}{}",
                endpoints::THUMBNAIL,
                encode_uri_component(&self.icon)
            )),
            EntryKind::Video => Some(format!(
                "{}{}",
                endpoints::THUMBNAIL,
                encode_uri_component(&self.full_path())
            )),
            _ => None,
        }
    }
}

/// Coarse category derived from the backend type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    Disk,
    Image,
    Video,
    Audio,
    Document,
    Archive,
    Code,
    Other,
}

impl EntryKind {
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        if tag == FOLDER_TAG || tag.eq_ignore_ascii_case("folder") || tag == "dir" {
            return Self::Folder;
        }
        if tag == DISK_TAG || tag.eq_ignore_ascii_case("disk") {
            return Self::Disk;
        }

        let ext = tag.to_ascii_lowercase();
        let ext = ext.as_str();
        if file_types::IMAGE.contains(&ext) {
            Self::Image
        } else if file_types::VIDEO.contains(&ext) {
            Self::Video
        } else if file_types::AUDIO.contains(&ext) {
            Self::Audio
        } else if file_types::DOCUMENT.contains(&ext) {
            Self::Document
        } else if file_types::ARCHIVE.contains(&ext) {
            Self::Archive
        } else if file_types::CODE.contains(&ext) {
            Self::Code
        } else {
            Self::Other
        }
    }

    pub fn static_icon(self) -> &'static str {
        match self {
            Self::Folder => static_icons::FOLDER,
            Self::Disk => static_icons::DISK,
            Self::Image => static_icons::IMAGE,
            Self::Video => static_icons::VIDEO,
            Self::Audio => static_icons::AUDIO,
            Self::Document => static_icons::DOCUMENT,
            Self::Archive => static_icons::ARCHIVE,
            Self::Code => static_icons::CODE,
            Self::Other => static_icons::FILE,
        }
    }
}

/// Response of the parent-directory request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentListing {
    pub path: String,
    #[serde(rename = "fileList", default)]
    pub file_list: Vec<FileEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, path: &str, kind: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: path.to_string(),
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_deserialize_backend_entry() {
        let json = r#"{"icon":"C:\\pics\\a.png","name":"a.png","modified":"2024-01-01 10:00",
            "type":"png","size":"1.50KB","path":"C:\\pics"}"#;
        let parsed: FileEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind, "png");
        assert_eq!(parsed.category(), EntryKind::Image);
        assert_eq!(parsed.size, "1.50KB");
    }

    #[test]
    fn test_disk_entry_tolerates_extra_fields() {
        let json = r#"{"name":"C:\\","modified":"-","type":"本地磁盘","size":"100 GB",
            "path":"","mountpoint":"C:\\","free":1}"#;
        let parsed: FileEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.category(), EntryKind::Disk);
        assert_eq!(parsed.full_path(), "C:\\");
        assert!(parsed.icon.is_empty());
    }

    #[test]
    fn test_full_path_normalizes() {
        assert_eq!(entry("b", "C:\\a\\", FOLDER_TAG).full_path(), "C:\\a\\b");
        assert_eq!(entry("b", "C:/a", FOLDER_TAG).full_path(), "C:/a\\b");
    }

    #[test]
    fn test_category_from_tag() {
        assert_eq!(EntryKind::from_tag("文件夹"), EntryKind::Folder);
        assert_eq!(EntryKind::from_tag("MP4"), EntryKind::Video);
        assert_eq!(EntryKind::from_tag("zip"), EntryKind::Archive);
        assert_eq!(EntryKind::from_tag("file"), EntryKind::Other);
    }

    #[test]
    fn test_thumbnail_key_only_in_grid() {
        let mut image = entry("a b.png", "C:\\pics", "png");
        image.icon = "C:\\pics\\a b.png".to_string();
        assert_eq!(image.thumbnail_key(ViewMode::CompactList), None);
        assert_eq!(
            image.thumbnail_key(ViewMode::LargeGrid).as_deref(),
            Some("/get_thumbnail/C%3A%5Cpics%5Ca%20b.png")
        );

        let video = entry("clip.mp4", "D:\\v", "mp4");
        assert_eq!(
            video.thumbnail_key(ViewMode::MediumGrid).as_deref(),
            Some("/get_thumbnail/D%3A%5Cv%5Cclip.mp4")
        );

        assert_eq!(entry("notes.txt", "C:\\", "txt").thumbnail_key(ViewMode::LargeGrid), None);
    }

    #[test]
    fn test_parent_listing_shape() {
        let json = r#"{"path":"C:\\","fileList":[{"name":"a","type":"文件夹","path":"C:\\"}]}"#;
        let parsed: ParentListing = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.path, "C:\\");
        assert_eq!(parsed.file_list.len(), 1);
        assert!(parsed.file_list[0].is_container());
    }
}
