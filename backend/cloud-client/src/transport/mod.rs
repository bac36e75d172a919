//! The HTTP seam between the client and the network.
//!
//! [`CloudClient`](crate::CloudClient) only ever talks to an [`HttpTransport`], so
//! tests substitute an in-memory transport and production injects
//! [`ReqwestTransport`].

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;

use crate::error::CloudClientError;

use common::HttpStatusCode;

use std::borrow::Cow;
use std::future::Future;

use reqwest::Method;
use reqwest::header::HeaderMap;
use url::Url;

/// A fully built request, ready to send.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Status and complete body of one response, plus the URL it answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub url: String,
    pub status: HttpStatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Executes prepared requests.
///
/// Implementations must be `Send + Sync`; one instance serves concurrent calls.
/// The body must be read to completion before the future resolves.
pub trait HttpTransport: Send + Sync {
    /// Send the request and collect the full response.
    ///
    /// # Errors
    ///
    /// Returns [`CloudClientError::Transport`] on connection, TLS, timeout, or
    /// body read failure. HTTP error statuses are NOT errors at this layer.
    fn execute(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<RawResponse, CloudClientError>> + Send;
}
