//! UI components built with Leptos.
//!
//! - [`explorer`] - File manager shell: toolbar, virtualized file view,
//!   sidebar tree, status bar and details panel
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod explorer;
pub mod icons;

pub use explorer::ExplorerShell;
