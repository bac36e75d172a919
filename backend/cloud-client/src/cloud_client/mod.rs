use crate::config::CloudConfig;
use crate::credentials::{CredentialStore, FileCredentialStore};
use crate::decode::{decode, decode_no_content};
use crate::endpoint::{Endpoint, resolve};
use crate::error::CloudClientError;
use crate::transport::{HttpTransport, PreparedRequest, RawResponse, ReqwestTransport};

use common::RedactedToken;

use log::{Level, debug, log_enabled, trace};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;
use zeroize::Zeroize;

const AUTHORIZATION_SCHEME: &str = "token";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Request body placeholder for calls that send nothing.
pub const NO_BODY: Option<&()> = None;

/// Which token a call should carry.
#[derive(Debug, Clone, Copy)]
pub enum Credentials<'a> {
    /// Environment override if configured, else the credential store entry
    /// for the resolved endpoint. A missing entry means an anonymous call.
    Stored,
    /// Exactly this token.
    Token(&'a RedactedToken),
    /// No Authorization header.
    Anonymous,
}

/// Authenticated client for the control-plane API.
///
/// Holds no per-call state: concurrent calls through a shared reference
/// never observe each other.
pub struct CloudClient<T = ReqwestTransport, S = FileCredentialStore> {
    transport: T,
    credentials: S,
    access_token: Option<RedactedToken>,
}

impl CloudClient {
    /// Production client: reqwest transport with the configured timeout and
    /// the file credential store under `config.home_dir`.
    pub fn from_config(config: &CloudConfig) -> Result<Self, CloudClientError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        let credentials = FileCredentialStore::new(&config.home_dir);

        Ok(CloudClient::new(transport, credentials).with_access_token(config.access_token.clone()))
    }
}

impl<T: HttpTransport, S: CredentialStore> CloudClient<T, S> {
    pub fn new(transport: T, credentials: S) -> Self {
        Self {
            transport,
            credentials,
            access_token: None,
        }
    }

    /// Token that [`Credentials::Stored`] prefers over the store.
    pub fn with_access_token(mut self, access_token: Option<RedactedToken>) -> Self {
        self.access_token = access_token;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn credential_store(&self) -> &S {
        &self.credentials
    }

    /// Send one request to `{endpoint}/api/{path}` and return the raw response.
    ///
    /// An empty `token` is the same as none.
    ///
    /// # Errors
    ///
    /// - [`CloudClientError::InvalidEndpoint`] if `cloud_url` does not resolve
    /// - [`CloudClientError::Transport`] if the request cannot be built or sent
    pub async fn api_call(
        &self,
        cloud_url: &str,
        method: Method,
        path: &str,
        body: Vec<u8>,
        token: Option<&RedactedToken>,
    ) -> Result<RawResponse, CloudClientError> {
        let endpoint =
            resolve(cloud_url).map_err(|e| e.with_context("getting API endpoint"))?;

        let request = prepare_request(&endpoint, method, path, body, token)?;

        debug!("Making API call: {} {}", request.method, request.url);
        if log_enabled!(Level::Trace) {
            trace!(
                "API call details ({}): headers={:?}; body={}",
                request.url,
                request.headers,
                String::from_utf8_lossy(&request.body)
            );
        }

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| e.with_context("calling API"))?;

        debug!(
            "API call response code ({}): {}",
            response.url, response.status
        );
        Ok(response)
    }

    /// JSON round trip: encode `request`, call, decode the success body into `Resp`.
    ///
    /// # Errors
    ///
    /// Any [`CloudClientError`]; see [`crate::decode`] for status handling.
    pub async fn rest_call<Req, Resp>(
        &self,
        cloud_url: &str,
        method: Method,
        path: &str,
        request: Option<&Req>,
        credentials: Credentials<'_>,
    ) -> Result<Resp, CloudClientError>
    where
        Req: Serialize + ?Sized + Sync,
        Resp: DeserializeOwned,
    {
        let response = self
            .call_with_credentials(cloud_url, method, path, request, credentials)
            .await?;

        decode(&response)
    }

    /// Like [`Self::rest_call`] for endpoints that answer with no content.
    /// Any success body is ignored.
    pub async fn rest_call_no_content<Req>(
        &self,
        cloud_url: &str,
        method: Method,
        path: &str,
        request: Option<&Req>,
        credentials: Credentials<'_>,
    ) -> Result<(), CloudClientError>
    where
        Req: Serialize + ?Sized + Sync,
    {
        let response = self
            .call_with_credentials(cloud_url, method, path, request, credentials)
            .await?;

        decode_no_content(&response)
    }

    async fn call_with_credentials<Req>(
        &self,
        cloud_url: &str,
        method: Method,
        path: &str,
        request: Option<&Req>,
        credentials: Credentials<'_>,
    ) -> Result<RawResponse, CloudClientError>
    where
        Req: Serialize + ?Sized + Sync,
    {
        let body = match request {
            Some(request) => serde_json::to_vec(request)
                .map_err(|e| CloudClientError::encode("marshalling request object as JSON", e))?,
            None => Vec::new(),
        };

        let token = match credentials {
            Credentials::Token(token) => Some(token.clone()),
            Credentials::Anonymous => None,
            Credentials::Stored => self.stored_token(cloud_url)?,
        };

        self.api_call(cloud_url, method, path, body, token.as_ref())
            .await
    }

    fn stored_token(&self, cloud_url: &str) -> Result<Option<RedactedToken>, CloudClientError> {
        if let Some(token) = &self.access_token {
            return Ok(Some(token.clone()));
        }

        let endpoint =
            resolve(cloud_url).map_err(|e| e.with_context("getting API endpoint"))?;

        let token = self.credentials.get(&endpoint).map_err(|e| {
            CloudClientError::credentials_unavailable(
                format!("getting stored credentials for {endpoint}"),
                e,
            )
        })?;

        if token.is_none() {
            debug!("No stored credentials for {endpoint}, calling anonymously");
        }
        Ok(token)
    }
}

#[track_caller]
fn prepare_request(
    endpoint: &Endpoint,
    method: Method,
    path: &str,
    body: Vec<u8>,
    token: Option<&RedactedToken>,
) -> Result<PreparedRequest, CloudClientError> {
    let url = Url::parse(&endpoint.join_api_path(path))
        .map_err(|e| CloudClientError::transport("creating new HTTP request", e))?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

    if let Some(token) = token.filter(|token| !token.is_empty()) {
        headers.insert(AUTHORIZATION, authorization_header(token)?);
    }

    Ok(PreparedRequest {
        method,
        url,
        headers,
        body,
    })
}

/// `token <TOKEN>`, marked sensitive. The formatted copy is wiped once the
/// header value owns the bytes.
#[track_caller]
pub(crate) fn authorization_header(token: &RedactedToken) -> Result<HeaderValue, CloudClientError> {
    let mut credentials = format!("{AUTHORIZATION_SCHEME} {}", token.as_str());
    let value = HeaderValue::from_str(&credentials);
    credentials.zeroize();

    let mut value = value.map_err(|e| {
        CloudClientError::transport(
            "creating new HTTP request: access token is not a valid header value",
            e,
        )
    })?;
    value.set_sensitive(true);
    Ok(value)
}
