//! Core explorer logic, independent of the browser.
//!
//! This module provides:
//! - [`layout`], [`pool`], [`scroller`] - Windowed rendering with node recycling
//! - [`image_loader`] - Deduplicated, cached thumbnail loading
//! - [`history`], [`navigation`] - Location history and supersedable requests
//! - [`backend`] - The JSON contract over a pluggable [`backend::Transport`]
//! - [`selection`], [`clipboard`], [`operations`] - File management state
//! - [`dir_tree`], [`details`], [`status`] - Sidebar and panel models
//! - [`viewer`] - In-app image and video viewer
//! - [`explorer`] - The controller tying them together
//!
//! Rendering, fetching and image display go through the [`surface::Surface`],
//! [`image_loader::ImageFetcher`] and [`image_loader::ImageSink`] traits so
//! everything here runs under native tests.

pub mod backend;
pub mod clipboard;
pub mod details;
pub mod dir_tree;
pub mod error;
pub mod explorer;
pub mod history;
pub mod image_loader;
pub mod layout;
pub mod navigation;
pub mod operations;
pub mod paths;
pub mod pool;
pub mod scroller;
pub mod selection;
pub mod status;
pub mod surface;
pub mod viewer;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{FetchError, MountError, NavigationError, ValidationError};
pub use explorer::Explorer;
