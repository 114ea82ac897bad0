//! Path classification for backend locations.
//!
//! Locations are backend paths as typed in the address bar. The virtual
//! root (`\` or `/`) lists the disks; a drive root such as `C:\` is the top
//! of one disk.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::ROOT_PATH;
use crate::utils::format::normalize_slashes;

fn drive_root_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]:[\\/]?$").expect("drive root pattern is valid"))
}

/// The virtual disk list.
pub fn is_root(location: &str) -> bool {
    matches!(location.trim(), "/" | "\\")
}

/// `C:`, `C:\` or `C:/`.
pub fn is_drive_root(location: &str) -> bool {
    drive_root_pattern().is_match(location.trim())
}

/// Child path `parent\name`, with slash runs collapsed.
pub fn join(parent: &str, name: &str) -> String {
    if is_root(parent) {
        return name.to_string();
    }
    normalize_slashes(&format!("{}\\{}", parent, name))
}

pub fn root() -> String {
    ROOT_PATH.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roots() {
        assert!(is_root("\\"));
        assert!(is_root("/"));
        assert!(!is_root("C:\\"));
        assert!(!is_root(""));

        assert!(is_drive_root("C:\\"));
        assert!(is_drive_root("d:/"));
        assert!(is_drive_root("E:"));
        assert!(!is_drive_root("C:\\Users"));
        assert!(!is_drive_root("\\"));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("C:\\", "Users"), "C:\\Users");
        assert_eq!(join("C:\\Users", "me"), "C:\\Users\\me");
        assert_eq!(join("\\", "D:\\"), "D:\\");
    }
}
