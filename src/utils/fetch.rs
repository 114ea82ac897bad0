//! HTTP transport for the backend JSON API.
//!
//! Every request is raced against [`FETCH_TIMEOUT_MS`]; a request that loses
//! the race is dropped and reported as [`FetchError::Timeout`].

use std::future::Future;

use futures::FutureExt;
use futures::future::{self, Either, LocalBoxFuture};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::backend::Transport;
use crate::core::error::FetchError;

// =============================================================================
// Timeout Racing
// =============================================================================

/// Race `work` against a timer of `timeout_ms` milliseconds.
pub async fn race_with_timeout<F: Future>(work: F, timeout_ms: u32) -> Result<F::Output, FetchError> {
    let timeout = TimeoutFuture::new(timeout_ms);
    futures::pin_mut!(work, timeout);
    match future::select(work, timeout).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(FetchError::Timeout),
    }
}

// =============================================================================
// Transport
// =============================================================================

/// POSTs JSON bodies to `base + endpoint`.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    base: String,
}

impl HttpTransport {
    /// `base` is prefixed to every endpoint; empty means same origin.
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Transport for HttpTransport {
    fn post(
        &self,
        endpoint: &'static str,
        body: Value,
    ) -> LocalBoxFuture<'static, Result<Value, FetchError>> {
        let url = format!("{}{}", self.base, endpoint);
        async move {
            let request = Request::post(&url)
                .json(&body)
                .map_err(|_| FetchError::RequestCreationFailed)?;

            let response = race_with_timeout(request.send(), FETCH_TIMEOUT_MS)
                .await?
                .map_err(|e| FetchError::NetworkError(e.to_string()))?;

            if !response.ok() {
                log::warn!("{} answered {}", url, response.status());
                return Err(FetchError::HttpError(response.status()));
            }

            let text = response
                .text()
                .await
                .map_err(|_| FetchError::ResponseReadFailed)?;
            serde_json::from_str(&text).map_err(|e| FetchError::JsonParseError(e.to_string()))
        }
        .boxed_local()
    }
}
