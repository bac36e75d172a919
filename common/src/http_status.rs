//! HTTP status code classification for response decoding.

/// HTTP status code as received on the wire.
///
/// Stored directly rather than parsed from error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const OK: HttpStatusCode = HttpStatusCode(200);
    pub const UNAUTHORIZED: HttpStatusCode = HttpStatusCode(401);

    /// 4xx client errors.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// Any status the control plane answers with an error body (400 through 599).
    pub fn is_error(&self) -> bool {
        self.is_client_error() || self.is_server_error()
    }

    pub fn is_unauthorized(&self) -> bool {
        *self == Self::UNAUTHORIZED
    }

    #[inline]
    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
