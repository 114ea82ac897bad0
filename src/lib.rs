//! Browser file manager with a virtualized grid/list view.

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
