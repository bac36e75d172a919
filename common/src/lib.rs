//! Shared primitives for the nimbus workspace.
//!
//! This crate holds the small building blocks every other crate leans on:
//! error locations, HTTP status classification, and secret handling.
//!
//! ## Architecture
//!
//! - **common** (this crate): Cross-cutting primitives
//! - **models**: Wire data exchanged with the control plane
//! - **cloud-client**: Endpoint resolution, transport, decoding, credentials
//! - **nimbus**: Command-line application wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;
