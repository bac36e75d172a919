//! Login and logout: thin wrappers around credential-store writes.

use crate::cloud_client::{CloudClient, Credentials, NO_BODY};
use crate::credentials::CredentialStore;
use crate::endpoint::resolve;
use crate::error::CoreError;
use crate::transport::HttpTransport;

use common::RedactedToken;
use models::UserInfo;

use log::info;
use reqwest::Method;

/// Identity lookup used to prove a token works before it is stored.
pub const USER_PATH: &str = "user";

/// Verify `token` against `cloud_url` and store it for the resolved endpoint.
///
/// Nothing is written if verification fails.
///
/// # Errors
///
/// Returns [`CoreError::Client`] if the endpoint is invalid or the server
/// rejects the token, and [`CoreError::Credentials`] if storing fails.
pub async fn login<T, S>(
    client: &CloudClient<T, S>,
    cloud_url: &str,
    token: &RedactedToken,
) -> Result<UserInfo, CoreError>
where
    T: HttpTransport,
    S: CredentialStore,
{
    let endpoint = resolve(cloud_url)?;

    let user: UserInfo = client
        .rest_call(
            cloud_url,
            Method::GET,
            USER_PATH,
            NO_BODY,
            Credentials::Token(token),
        )
        .await?;

    client.credential_store().set(&endpoint, token)?;

    info!("Logged in to {endpoint} as {}", user.name);
    Ok(user)
}

/// Delete the stored token for `cloud_url`'s endpoint. Succeeds if none was stored.
pub fn logout<S: CredentialStore>(store: &S, cloud_url: &str) -> Result<(), CoreError> {
    let endpoint = resolve(cloud_url)?;

    store.delete(&endpoint)?;

    info!("Logged out of {endpoint}");
    Ok(())
}
