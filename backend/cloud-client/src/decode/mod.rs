//! Turns a [`RawResponse`] into a typed value or a classified error.
//!
//! - 401: always [`CloudClientError::Unauthenticated`], body never inspected
//! - other 400..=599: structured [`ErrorPayload`] if the body is one, else
//!   the HTTP status plus trimmed body text
//! - anything else: the whole body decodes into the target, or the call fails

use crate::LOGIN_COMMAND;
use crate::error::CloudClientError;
use crate::transport::RawResponse;

use models::ErrorPayload;

use log::{Level, log_enabled, trace};
use serde::de::DeserializeOwned;

pub const UNAUTHENTICATED_MESSAGE: &str = const_format::concatcp!(
    "this command requires logging in; try running '",
    LOGIN_COMMAND,
    "' first"
);

/// Decode a success body into `R`.
///
/// # Errors
///
/// Error statuses map as described in the module docs; a success body that
/// does not match `R` is [`CloudClientError::Decode`].
#[track_caller]
pub fn decode<R: DeserializeOwned>(response: &RawResponse) -> Result<R, CloudClientError> {
    check_status(response)?;

    serde_json::from_slice(&response.body)
        .map_err(|e| CloudClientError::decode("unmarshalling response object", e))
}

/// Classify the status and ignore the success body entirely.
#[track_caller]
pub fn decode_no_content(response: &RawResponse) -> Result<(), CloudClientError> {
    check_status(response)
}

#[track_caller]
fn check_status(response: &RawResponse) -> Result<(), CloudClientError> {
    if log_enabled!(Level::Trace) {
        trace!(
            "API call response body ({}): {}",
            response.url,
            response.body_text()
        );
    }

    if !response.status.is_error() {
        return Ok(());
    }

    if response.status.is_unauthorized() {
        return Err(CloudClientError::unauthenticated());
    }

    let payload = serde_json::from_slice::<ErrorPayload>(&response.body).unwrap_or_else(|_| {
        ErrorPayload::from_raw_body(response.status.as_u16(), &response.body)
    });

    Err(CloudClientError::api(payload))
}
