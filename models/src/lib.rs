//! Wire models for the nimbus control-plane API.
//!
//! Pure data structures with no I/O. The transport and decoding logic that
//! moves them over HTTP lives in `cloud-client`.

pub mod api;
pub mod error;
pub mod project;

pub use api::error_payload::ErrorPayload;
pub use api::user_info::UserInfo;
pub use error::model_error::ModelError;
pub use project::builder::ProjectIdentifierBuilder;
pub use project::ProjectIdentifier;

#[cfg(test)]
mod tests;
