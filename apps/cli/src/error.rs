use cloud_client::error::{CloudClientError, ConfigError, CoreError, CredentialStoreError};

use common::ErrorLocation;

use thiserror::Error;

/// Everything the `nimbus` binary can fail with.
///
/// Library failures pass through [`NimbusError::Core`] unchanged so the
/// printed message still points at the library call site.
#[derive(Debug, Error)]
pub enum NimbusError {
    /// Error from this App
    #[error("Nimbus Error: {message} {location}")]
    Nimbus {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    /// Bad interactive input
    #[error("Input Error: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },
}

impl From<CloudClientError> for NimbusError {
    fn from(error: CloudClientError) -> Self {
        Self::Core(error.into())
    }
}

impl From<ConfigError> for NimbusError {
    fn from(error: ConfigError) -> Self {
        Self::Core(error.into())
    }
}

impl From<CredentialStoreError> for NimbusError {
    fn from(error: CredentialStoreError) -> Self {
        Self::Core(error.into())
    }
}
