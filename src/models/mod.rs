//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`FileEntry`], [`EntryKind`], [`ParentListing`] - Directory listings from the backend
//! - [`ViewMode`], [`Viewport`] - View density and container geometry
//! - Request bodies of the backend JSON contract

mod entry;
mod requests;
mod view;

pub use entry::{DISK_TAG, EntryKind, FOLDER_TAG, FileEntry, ParentListing};
pub use requests::{
    ClipboardOp, CreateRequest, DeleteRequest, DirRecord, PasteRequest, PathRequest,
    RenameRequest, SearchRequest,
};
pub use view::{ViewMode, Viewport};
