//! Thumbnail fetching as blob object URLs.
//!
//! Every in-flight request shares one `AbortController`; aborting swaps in a
//! fresh controller so later fetches are unaffected.

use std::cell::RefCell;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use gloo_net::http::Request;
use web_sys::{AbortController, Blob, BlobPropertyBag, Url};

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::error::FetchError;
use crate::core::image_loader::ImageFetcher;
use crate::utils::fetch::race_with_timeout;

#[derive(Default)]
pub struct BlobFetcher {
    controller: RefCell<Option<AbortController>>,
}

impl BlobFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn controller(&self) -> Option<AbortController> {
        let mut slot = self.controller.borrow_mut();
        if slot.is_none() {
            *slot = AbortController::new().ok();
        }
        slot.clone()
    }
}

fn object_url(bytes: &[u8], content_type: &str) -> Result<String, FetchError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| FetchError::InvalidContent)?;
    Url::create_object_url_with_blob(&blob).map_err(|_| FetchError::InvalidContent)
}

impl ImageFetcher for BlobFetcher {
    fn fetch(&self, key: &str) -> LocalBoxFuture<'static, Result<String, FetchError>> {
        let Some(controller) = self.controller() else {
            return future::ready(Err(FetchError::RequestCreationFailed)).boxed_local();
        };
        let signal = controller.signal();
        let request = Request::get(key).abort_signal(Some(&signal));

        async move {
            let response = race_with_timeout(request.send(), FETCH_TIMEOUT_MS)
                .await?
                .map_err(|e| {
                    if signal.aborted() {
                        FetchError::Aborted
                    } else {
                        FetchError::NetworkError(e.to_string())
                    }
                })?;
            if !response.ok() {
                return Err(FetchError::HttpError(response.status()));
            }

            let content_type = response
                .headers()
                .get("content-type")
                .unwrap_or_else(|| "image/jpeg".to_string());
            let bytes = response
                .binary()
                .await
                .map_err(|_| FetchError::ResponseReadFailed)?;
            object_url(&bytes, &content_type)
        }
        .boxed_local()
    }

    fn release(&self, handle: &str) {
        if Url::revoke_object_url(handle).is_err() {
            log::debug!("could not revoke {}", handle);
        }
    }

    fn abort_all(&self) {
        if let Some(controller) = self.controller.borrow_mut().take() {
            controller.abort();
        }
    }
}
