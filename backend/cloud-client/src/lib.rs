pub mod auth;
pub mod cloud_client;
pub mod config;
pub mod credentials;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod transport;

#[cfg(test)]
mod tests;

pub use cloud_client::{CloudClient, Credentials, NO_BODY};
pub use config::CloudConfig;
pub use credentials::{CredentialStore, FileCredentialStore};
pub use endpoint::{Endpoint, resolve};
pub use transport::{HttpTransport, PreparedRequest, RawResponse, ReqwestTransport};

pub use reqwest::Method;

/// Host prefix every API origin carries.
pub const API_PREFIX: &str = "api";
pub const DEFAULT_CLOUD_HOST: &str = "nimbus.dev";
/// Used when neither `--cloud-url` nor `NIMBUS_API` is given.
pub const DEFAULT_CLOUD_URL: &str = const_format::concatcp!("https://", DEFAULT_CLOUD_HOST, "/");

pub const API_URL_ENV_VAR: &str = "NIMBUS_API";
pub const ACCESS_TOKEN_ENV_VAR: &str = "NIMBUS_ACCESS_TOKEN";
pub const API_TIMEOUT_ENV_VAR: &str = "NIMBUS_API_TIMEOUT";
pub const HOME_ENV_VAR: &str = "NIMBUS_HOME";

pub const LOGIN_COMMAND: &str = "nimbus login";
