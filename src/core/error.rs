//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`FetchError`] - Network/fetch-related errors for backend and thumbnail requests
//! - [`ValidationError`] - User input rejected before any request is sent
//! - [`NavigationError`] - Failures surfaced by navigation and file operations
//! - [`MountError`] - Fatal setup failures while mounting the view

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, connection reset, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON encoding or parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
    /// Request was cancelled before it completed
    #[error("Request aborted")]
    Aborted,
}

/// Input rejected locally, before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("name cannot contain any of \\ / : * ? \" < > | ({0})")]
    IllegalCharacters(String),
    #[error("no item selected")]
    NoSelection,
    #[error("clipboard is empty")]
    NothingToPaste,
    #[error("cannot paste into the source directory")]
    PasteIntoSource,
    #[error("cannot create items at the disk list")]
    CreateAtRoot,
    #[error("search term is empty or the current location cannot be searched")]
    InvalidSearch,
    #[error("location is empty")]
    EmptyLocation,
}

/// Errors surfaced by navigation and by operations that refresh the listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Backend answered `null`: the path does not exist
    #[error("path not found: {0}")]
    NotFound(String),
}

/// Fatal errors while mounting the view into the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("required element missing: {0}")]
    MissingElement(&'static str),
    #[error("failed to create element: {0}")]
    ElementCreation(String),
    #[error("failed to create IntersectionObserver")]
    Observer,
}
