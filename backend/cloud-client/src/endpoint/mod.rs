//! Canonical API origins.
//!
//! A user may point the CLI at `https://nimbus.dev`, `https://nimbus.dev/` or
//! `https://api.nimbus.dev`; all of them resolve to the same [`Endpoint`].

use crate::API_PREFIX;
use crate::error::CloudClientError;

use std::fmt::{Display, Formatter, Result as FormatResult};

use url::Url;

/// Validated API origin: `api.`-prefixed host, no query or fragment, no trailing `/`.
///
/// Only [`resolve`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Endpoint(String);

impl Endpoint {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{endpoint}/api/{path}` with one leading `/` dropped from `path`.
    pub fn join_api_path(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/api/{}", self.0, path)
    }
}

impl Display for Endpoint {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(&self.0)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a user-supplied cloud URL into its API origin.
///
/// Pure: no I/O and no shared state.
///
/// # Errors
///
/// Returns [`CloudClientError::InvalidEndpoint`] if the input is empty, does not
/// parse, has no host, or carries a query string or fragment.
#[track_caller]
pub fn resolve(raw_url: &str) -> Result<Endpoint, CloudClientError> {
    if raw_url.is_empty() {
        return Err(CloudClientError::invalid_endpoint("missing cloud URL"));
    }

    let mut url = Url::parse(raw_url).map_err(|e| {
        CloudClientError::invalid_endpoint(format!("malformed cloud URL {raw_url}: {e}"))
    })?;

    if url.query().is_some() || url.fragment().is_some() {
        return Err(CloudClientError::invalid_endpoint(format!(
            "cloud URL may not contain querystring or fragment: {raw_url}"
        )));
    }

    let host = url
        .host_str()
        .ok_or_else(|| {
            CloudClientError::invalid_endpoint(format!("cloud URL has no host: {raw_url}"))
        })?
        .to_string();

    let api_host_prefix = const_format::concatcp!(API_PREFIX, ".");
    if !host.starts_with(api_host_prefix) {
        url.set_host(Some(&format!("{api_host_prefix}{host}")))
            .map_err(|e| {
                CloudClientError::invalid_endpoint(format!(
                    "cannot derive API host from {raw_url}: {e}"
                ))
            })?;
    }

    Ok(Endpoint(url.as_str().trim_end_matches('/').to_string()))
}
