//! Validation and request building for file operations.
//!
//! Everything here runs before a request is sent; a rejected operation never
//! reaches the backend.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::{DEFAULT_DIR_NAME, DEFAULT_FILE_NAME};
use crate::core::backend::CreateKind;
use crate::core::error::ValidationError;
use crate::core::paths;
use crate::core::viewer::MediaKind;
use crate::models::{CreateRequest, DeleteRequest, EntryKind, FileEntry, RenameRequest};
use crate::utils::url::file_url;

fn illegal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("illegal name pattern is valid"))
}

/// Reject empty names and names with characters the host filesystem forbids.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let found: String = illegal_pattern()
        .find_iter(name)
        .map(|m| m.as_str())
        .collect();
    if !found.is_empty() {
        return Err(ValidationError::IllegalCharacters(found));
    }
    Ok(())
}

pub fn create_request(
    kind: CreateKind,
    name: &str,
    location: &str,
) -> Result<CreateRequest, ValidationError> {
    if paths::is_root(location) {
        return Err(ValidationError::CreateAtRoot);
    }
    let name = match name.trim() {
        "" => match kind {
            CreateKind::File => DEFAULT_FILE_NAME,
            CreateKind::Directory => DEFAULT_DIR_NAME,
        },
        given => given,
    };
    validate_name(name)?;
    Ok(CreateRequest {
        name: name.to_string(),
        path: location.to_string(),
    })
}

/// `None` when the name did not change.
pub fn rename_request(
    old_name: &str,
    new_name: &str,
    location: &str,
) -> Result<Option<RenameRequest>, ValidationError> {
    let new_name = new_name.trim();
    validate_name(new_name)?;
    if new_name == old_name {
        return Ok(None);
    }
    Ok(Some(RenameRequest {
        old_name: old_name.to_string(),
        new_name: new_name.to_string(),
        path: location.to_string(),
    }))
}

pub fn delete_request(
    location: &str,
    entries: Vec<FileEntry>,
) -> Result<DeleteRequest, ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::NoSelection);
    }
    Ok(DeleteRequest {
        path: location.to_string(),
        file_list: entries,
    })
}

/// What activating an entry does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpenTarget {
    /// Navigate into this location.
    Directory(String),
    /// Show in the in-app media viewer.
    Media(MediaKind),
    /// Open the raw file in a new tab.
    File { url: String, kind: EntryKind },
}

pub fn open_target(entry: &FileEntry) -> OpenTarget {
    match entry.category() {
        EntryKind::Folder | EntryKind::Disk => OpenTarget::Directory(entry.full_path()),
        EntryKind::Image => OpenTarget::Media(MediaKind::Image),
        EntryKind::Video => OpenTarget::Media(MediaKind::Video),
        kind => OpenTarget::File {
            url: file_url(&entry.full_path()),
            kind,
        },
    }
}
