//! Error types for control-plane calls.
//!
//! - Every variant carries an ErrorLocation
//! - Constructors use `#[track_caller]` so the location is the failing call site
//! - Underlying causes are kept as `#[source]`, never flattened away

use crate::decode::UNAUTHENTICATED_MESSAGE;
use crate::error::credentials::CredentialStoreError;

use common::ErrorLocation;
use models::ErrorPayload;

use std::error::Error as StdError;
use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CloudClientError {
    #[error("Invalid Endpoint Error: {message} {location}")]
    InvalidEndpoint {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credentials Unavailable Error: {message} {location}")]
    CredentialsUnavailable {
        message: String,
        location: ErrorLocation,
        #[source]
        source: CredentialStoreError,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Unauthenticated Error: {message} {location}")]
    Unauthenticated {
        message: String,
        location: ErrorLocation,
    },

    #[error("API Error: {payload} {location}")]
    Api {
        payload: ErrorPayload,
        location: ErrorLocation,
    },

    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Encode Error: {message} {location}")]
    Encode {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl CloudClientError {
    #[track_caller]
    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        CloudClientError::InvalidEndpoint {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn credentials_unavailable(
        message: impl Into<String>,
        source: CredentialStoreError,
    ) -> Self {
        CloudClientError::CredentialsUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn transport(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        CloudClientError::Transport {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
            source: source.into(),
        }
    }

    #[track_caller]
    pub fn unauthenticated() -> Self {
        CloudClientError::Unauthenticated {
            message: UNAUTHENTICATED_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn api(payload: ErrorPayload) -> Self {
        CloudClientError::Api {
            payload,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>, source: serde_json::Error) -> Self {
        CloudClientError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn encode(message: impl Into<String>, source: serde_json::Error) -> Self {
        CloudClientError::Encode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    /// Prefix the message with the operation that was running. Location and
    /// source are kept from the original error.
    pub fn with_context(self, context: &str) -> Self {
        match self {
            CloudClientError::InvalidEndpoint { message, location } => {
                CloudClientError::InvalidEndpoint {
                    message: format!("{context}: {message}"),
                    location,
                }
            }
            CloudClientError::CredentialsUnavailable {
                message,
                location,
                source,
            } => CloudClientError::CredentialsUnavailable {
                message: format!("{context}: {message}"),
                location,
                source,
            },
            CloudClientError::Transport {
                message,
                location,
                source,
            } => CloudClientError::Transport {
                message: format!("{context}: {message}"),
                location,
                source,
            },
            CloudClientError::Decode {
                message,
                location,
                source,
            } => CloudClientError::Decode {
                message: format!("{context}: {message}"),
                location,
                source,
            },
            CloudClientError::Encode {
                message,
                location,
                source,
            } => CloudClientError::Encode {
                message: format!("{context}: {message}"),
                location,
                source,
            },
            // Server-provided payloads and the fixed login guidance are shown verbatim.
            other @ (CloudClientError::Unauthenticated { .. } | CloudClientError::Api { .. }) => {
                other
            }
        }
    }

    /// Status code reported by the server, if the call got that far.
    pub fn status_code(&self) -> Option<i32> {
        match self {
            CloudClientError::Unauthenticated { .. } => Some(401),
            CloudClientError::Api { payload, .. } => Some(payload.code),
            _ => None,
        }
    }

    /// Get error category for logging.
    pub fn error_category(&self) -> &'static str {
        match self {
            CloudClientError::InvalidEndpoint { .. } => "invalid_endpoint",
            CloudClientError::CredentialsUnavailable { .. } => "credentials_unavailable",
            CloudClientError::Transport { .. } => "transport",
            CloudClientError::Unauthenticated { .. } => "unauthenticated",
            CloudClientError::Api { payload, .. } if (400..500).contains(&payload.code) => {
                "client_error"
            }
            CloudClientError::Api { payload, .. } if (500..600).contains(&payload.code) => {
                "server_error"
            }
            CloudClientError::Api { .. } => "api",
            CloudClientError::Decode { .. } => "decode",
            CloudClientError::Encode { .. } => "encode",
        }
    }
}
