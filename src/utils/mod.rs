//! Utility modules for formatting and browser glue.
//!
//! Provides:
//! - [`format_size`], [`parse_size`], [`normalize_slashes`] - Display helpers
//! - [`encode_uri_component`], [`file_url`] - Backend URL building
//! - [`HttpTransport`] - Backend requests over `fetch` with timeout
//! - [`BlobFetcher`] - Thumbnails as object URLs
//! - [`DomSurface`], [`DomImageSink`] - Scroller rendering over real elements
//! - [`logger`] - Console backend for the `log` facade

pub mod format;
pub mod url;

pub mod dom;
pub mod fetch;
pub mod logger;
pub mod thumbnail;

pub use format::{format_size, normalize_slashes, parse_size};
pub use url::{encode_uri_component, file_url};

pub use dom::{DomImageSink, DomSurface};
pub use fetch::HttpTransport;
pub use thumbnail::BlobFetcher;
