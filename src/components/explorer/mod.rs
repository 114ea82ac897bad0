//! File manager UI.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Toolbar (nav, address, search, actions)  │
//! ├──────────┬───────────────────────────────┤
//! │ Sidebar  │ FileView          │ Details   │
//! │ (tree)   │ (virtual scroll)  │ (preview) │
//! ├──────────┴───────────────────────────────┤
//! │ StatusBar                                │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Only [`FileView`] touches the scroll container; it mounts the controller
//! and hands it to [`AppContext`](crate::app::AppContext). Every other
//! component talks to the controller through the context. Images and videos
//! open in [`MediaViewerOverlay`], which covers the file view.

mod details;
mod file_view;
mod shell;
mod sidebar;
mod status_bar;
mod toolbar;
mod viewer;

pub use details::DetailsPanel;
pub use file_view::FileView;
pub use shell::ExplorerShell;
pub use sidebar::Sidebar;
pub use status_bar::StatusBar;
pub use toolbar::Toolbar;
pub use viewer::MediaViewerOverlay;
