//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps toolbar and sidebar actions to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowLeft as Back, LuArrowRight as Forward, LuArrowUp as Up,
        LuCheckCheck as SelectAll, LuChevronDown as Expanded, LuChevronRight as Collapsed,
        LuChevronsDown as ToBottom, LuChevronsUp as ToTop, LuClipboard as Paste, LuCopy as Copy,
        LuFilePlus as NewFile, LuFolder as Folder, LuFolderPlus as NewFolder,
        LuHardDrive as Disk, LuImage as LargeGrid, LuLayoutGrid as MediumGrid,
        LuList as CompactList, LuListChecks as MultiSelect, LuPencil as Rename,
        LuRefreshCw as Refresh, LuScissors as Cut, LuSearch as Search, LuTrash2 as Delete,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Refresh, BsArrowLeft as Back, BsArrowRight as Forward,
        BsArrowUp as Up, BsCheck2All as SelectAll, BsCheck2Square as MultiSelect,
        BsChevronBarDown as ToBottom, BsChevronBarUp as ToTop, BsChevronDown as Expanded,
        BsChevronRight as Collapsed, BsClipboard as Paste, BsFileEarmarkPlus as NewFile,
        BsFiles as Copy, BsFolderFill as Folder, BsFolderPlus as NewFolder, BsGrid as MediumGrid,
        BsGridFill as LargeGrid, BsHdd as Disk, BsListUl as CompactList, BsPencil as Rename,
        BsScissors as Cut, BsSearch as Search, BsTrash as Delete, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

// Navigation
themed_icon!(BACK, Back);
themed_icon!(FORWARD, Forward);
themed_icon!(UP, Up);
themed_icon!(REFRESH, Refresh);
themed_icon!(SEARCH, Search);

// View modes
themed_icon!(COMPACT_LIST, CompactList);
themed_icon!(MEDIUM_GRID, MediumGrid);
themed_icon!(LARGE_GRID, LargeGrid);
themed_icon!(TO_TOP, ToTop);
themed_icon!(TO_BOTTOM, ToBottom);

// File operations
themed_icon!(NEW_FILE, NewFile);
themed_icon!(NEW_FOLDER, NewFolder);
themed_icon!(RENAME, Rename);
themed_icon!(DELETE, Delete);
themed_icon!(COPY, Copy);
themed_icon!(CUT, Cut);
themed_icon!(PASTE, Paste);
themed_icon!(MULTI_SELECT, MultiSelect);
themed_icon!(SELECT_ALL, SelectAll);

// Sidebar
themed_icon!(FOLDER, Folder);
themed_icon!(DISK, Disk);
themed_icon!(EXPANDED, Expanded);
themed_icon!(COLLAPSED, Collapsed);
themed_icon!(CLOSE, Close);
