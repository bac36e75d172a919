use super::{HttpTransport, PreparedRequest, RawResponse};
use crate::error::CloudClientError;

use common::HttpStatusCode;

use std::time::Duration;

use log::debug;
use reqwest::Client;

/// Production transport over a single shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport. `None` means no request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, CloudClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| CloudClientError::transport("building HTTP client", e))?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, CloudClientError> {
        let url = request.url.to_string();

        let response = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| CloudClientError::transport("performing HTTP request", e))?;

        let status = HttpStatusCode(response.status().as_u16());
        debug!("Transport received HTTP {status} from {url}");

        let body = response
            .bytes()
            .await
            .map_err(|e| CloudClientError::transport("reading response from API", e))?
            .to_vec();

        Ok(RawResponse { url, status, body })
    }
}
