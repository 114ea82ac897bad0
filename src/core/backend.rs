//! Typed client for the file-manager backend.
//!
//! Every backend call is a POST of a JSON body answered with JSON. The
//! transport is a trait so the browser build can use HTTP while tests script
//! responses.

use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::endpoints;
use crate::core::error::FetchError;
use crate::models::{
    CreateRequest, DeleteRequest, DirRecord, FileEntry, ParentListing, PasteRequest, PathRequest,
    RenameRequest, SearchRequest,
};

/// Raw JSON request/response channel.
pub trait Transport {
    fn post(&self, endpoint: &'static str, body: Value)
    -> LocalBoxFuture<'static, Result<Value, FetchError>>;
}

/// Listing endpoints answer `null` for paths that do not exist.
pub type ListingResult = Result<Option<Vec<FileEntry>>, FetchError>;

/// Which of the two create endpoints to call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateKind {
    File,
    Directory,
}

impl CreateKind {
    fn endpoint(self) -> &'static str {
        match self {
            Self::File => endpoints::CREATE_FILE,
            Self::Directory => endpoints::CREATE_DIR,
        }
    }
}

pub struct Api<T> {
    transport: Rc<T>,
}

impl<T> Clone for Api<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
        }
    }
}

impl<T: Transport> Api<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Rc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call<B, R>(&self, endpoint: &'static str, body: &B) -> LocalBoxFuture<'static, Result<R, FetchError>>
    where
        B: Serialize,
        R: DeserializeOwned + 'static,
    {
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(e) => return future::ready(Err(FetchError::JsonParseError(e.to_string()))).boxed_local(),
        };
        let request = self.transport.post(endpoint, body);
        async move {
            let value = request.await?;
            serde_json::from_value(value).map_err(|e| FetchError::JsonParseError(e.to_string()))
        }
        .boxed_local()
    }

    pub fn list_directory(&self, path: &str) -> LocalBoxFuture<'static, ListingResult> {
        self.call(
            endpoints::LIST_DIRECTORY,
            &PathRequest {
                path: path.to_string(),
            },
        )
    }

    pub fn parent(
        &self,
        path: &str,
    ) -> LocalBoxFuture<'static, Result<Option<ParentListing>, FetchError>> {
        self.call(
            endpoints::PARENT,
            &PathRequest {
                path: path.to_string(),
            },
        )
    }

    pub fn search(&self, path: &str, term: &str) -> LocalBoxFuture<'static, ListingResult> {
        self.call(
            endpoints::SEARCH,
            &SearchRequest {
                path: path.to_string(),
                search_term: term.to_string(),
            },
        )
    }

    pub fn list_subdirs(
        &self,
        path: &str,
    ) -> LocalBoxFuture<'static, Result<Option<Vec<DirRecord>>, FetchError>> {
        self.call(
            endpoints::LIST_SUBDIRS,
            &PathRequest {
                path: path.to_string(),
            },
        )
    }

    pub fn create(&self, kind: CreateKind, request: &CreateRequest) -> LocalBoxFuture<'static, ListingResult> {
        self.call(kind.endpoint(), request)
    }

    pub fn rename(&self, request: &RenameRequest) -> LocalBoxFuture<'static, ListingResult> {
        self.call(endpoints::RENAME, request)
    }

    pub fn delete(&self, request: &DeleteRequest) -> LocalBoxFuture<'static, ListingResult> {
        self.call(endpoints::DELETE, request)
    }

    pub fn paste(&self, request: &PasteRequest) -> LocalBoxFuture<'static, ListingResult> {
        self.call(endpoints::PASTE, request)
    }
}
