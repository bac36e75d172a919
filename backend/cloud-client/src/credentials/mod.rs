//! Access tokens persisted per endpoint.
//!
//! The client only reads through [`CredentialStore::get`]; login and logout
//! are the writers.

mod file_store;

pub use file_store::FileCredentialStore;

#[cfg(test)]
pub(crate) use file_store::CredentialsFile;

use crate::endpoint::Endpoint;
use crate::error::CredentialStoreError;

use common::RedactedToken;

/// Storage backend for access tokens, keyed by resolved [`Endpoint`].
///
/// Implementations must be `Send + Sync`; the client is shared across tasks.
pub trait CredentialStore: Send + Sync {
    /// Look up the token for an endpoint.
    ///
    /// `Ok(None)` means nothing is stored; the caller proceeds anonymously.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn get(&self, endpoint: &Endpoint) -> Result<Option<RedactedToken>, CredentialStoreError>;

    /// Store (or replace) the token for an endpoint.
    fn set(&self, endpoint: &Endpoint, token: &RedactedToken) -> Result<(), CredentialStoreError>;

    /// Remove the token for an endpoint. Removing a missing entry succeeds.
    fn delete(&self, endpoint: &Endpoint) -> Result<(), CredentialStoreError>;
}
