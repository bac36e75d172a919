use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::{Deserialize, Serialize};

/// Structured error body returned by the control plane on 4xx/5xx responses.
///
/// Both fields are required when decoding. This is stricter than a lenient
/// decode that would zero-fill missing fields: `{"message":"boom"}` is not
/// read as code 0 but surfaced verbatim through [`ErrorPayload::from_raw_body`],
/// with the HTTP status as the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: i32,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Build a payload from an undecodable body: the HTTP status becomes the
    /// code and the trimmed body text becomes the message.
    pub fn from_raw_body(status: u16, body: &[u8]) -> Self {
        Self {
            code: i32::from(status),
            message: String::from_utf8_lossy(body).trim().to_string(),
        }
    }
}

impl Display for ErrorPayload {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "[{}] {}", self.code, self.message)
    }
}
