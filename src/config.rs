//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Layout Configuration
// =============================================================================

/// Row height of the compact list view, in CSS pixels.
pub const LIST_ROW_HEIGHT: f64 = 36.0;

/// Extra rows rendered above and below the viewport in list view.
pub const LIST_BUFFER_ROWS: usize = 5;

/// Target cell edge for the medium grid.
pub const MEDIUM_CELL_TARGET: f64 = 128.0;

/// Target cell edge for the large grid.
pub const LARGE_CELL_TARGET: f64 = 256.0;

/// Extra rows rendered above and below the viewport in grid views.
pub const GRID_BUFFER_ROWS: usize = 3;

/// Grids never collapse below this many columns.
pub const MIN_GRID_COLUMNS: usize = 2;

/// Inset applied on every side of a grid cell.
pub const GRID_GUTTER: f64 = 1.0;

/// Layout tunables, bundled so tests can vary them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub list_row_height: f64,
    pub list_buffer_rows: usize,
    pub medium_cell_target: f64,
    pub large_cell_target: f64,
    pub grid_buffer_rows: usize,
    pub min_grid_columns: usize,
    pub grid_gutter: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            list_row_height: LIST_ROW_HEIGHT,
            list_buffer_rows: LIST_BUFFER_ROWS,
            medium_cell_target: MEDIUM_CELL_TARGET,
            large_cell_target: LARGE_CELL_TARGET,
            grid_buffer_rows: GRID_BUFFER_ROWS,
            min_grid_columns: MIN_GRID_COLUMNS,
            grid_gutter: GRID_GUTTER,
        }
    }
}

// =============================================================================
// Image Loading
// =============================================================================

/// IntersectionObserver root margin: thumbnails start loading this far
/// before they scroll into view.
pub const THUMBNAIL_ROOT_MARGIN: &str = "200px 0px";

/// Number of unreferenced thumbnails kept alive after a render pass.
pub const THUMBNAIL_CACHE_SLACK: usize = 64;

/// Static fallback shown when a thumbnail fails to load.
pub const FALLBACK_THUMBNAIL: &str = "/static/icons/broken.svg";

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: u32 = 10000;

/// Backend endpoints.
pub mod endpoints {
    pub const LIST_DIRECTORY: &str = "/get_files";
    pub const PARENT: &str = "/get_parent_path_files";
    pub const SEARCH: &str = "/search_files";
    pub const LIST_SUBDIRS: &str = "/get_dirs";
    pub const CREATE_FILE: &str = "/create_file";
    pub const CREATE_DIR: &str = "/create_dir";
    pub const RENAME: &str = "/rename";
    pub const DELETE: &str = "/delete";
    pub const PASTE: &str = "/paste";
    /// Prefix for thumbnail bytes; the encoded icon key is appended.
    pub const THUMBNAIL: &str = "/get_thumbnail/";
    /// Prefix for raw file content; the encoded full path is appended.
    pub const FILE: &str = "/get_file/";
}

// =============================================================================
// Paths
// =============================================================================

/// Virtual root listing every disk.
pub const ROOT_PATH: &str = "\\";

/// Name used when "new file" is confirmed with an empty name.
pub const DEFAULT_FILE_NAME: &str = "新建文件.txt";

/// Name used when "new folder" is confirmed with an empty name.
pub const DEFAULT_DIR_NAME: &str = "新建文件夹";

// =============================================================================
// File Categories
// =============================================================================

pub mod file_types {
    pub const IMAGE: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "ico"];
    pub const VIDEO: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "mkv", "webm"];
    pub const AUDIO: &[&str] = &["mp3", "wav", "ogg", "aac", "flac"];
    pub const DOCUMENT: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt"];
    pub const ARCHIVE: &[&str] = &["zip", "rar", "7z", "tar", "gz"];
    pub const CODE: &[&str] = &[
        "js", "html", "css", "py", "java", "cpp", "c", "php", "json", "xml",
    ];
}

/// Static icons shown in list rows and as grid placeholders.
pub mod static_icons {
    pub const FOLDER: &str = "/static/icons/folder.svg";
    pub const DISK: &str = "/static/icons/disk.svg";
    pub const IMAGE: &str = "/static/icons/image.svg";
    pub const VIDEO: &str = "/static/icons/video.svg";
    pub const AUDIO: &str = "/static/icons/audio.svg";
    pub const DOCUMENT: &str = "/static/icons/document.svg";
    pub const ARCHIVE: &str = "/static/icons/archive.svg";
    pub const CODE: &str = "/static/icons/code.svg";
    pub const FILE: &str = "/static/icons/file.svg";
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Text of the placeholder shown for an empty directory.
pub const EMPTY_PLACEHOLDER_TEXT: &str = "空";

/// Maximum level forwarded to the browser console.
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
