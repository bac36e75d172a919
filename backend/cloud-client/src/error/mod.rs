pub mod cloud_client;
pub mod config;
pub mod credentials;

pub use cloud_client::CloudClientError;
pub use config::ConfigError;
pub use credentials::CredentialStoreError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Client(#[from] CloudClientError),

    #[error(transparent)]
    Credentials(#[from] CredentialStoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
