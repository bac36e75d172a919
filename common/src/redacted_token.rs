//! Access token handling with redacted Debug output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// A bearer token that never exposes its value in logs or debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactedToken {
    inner: String,
}

impl RedactedToken {
    /// Wrap a token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: token.into(),
        }
    }

    /// Wrap a token value, treating blank input as no token at all.
    pub fn non_empty(token: impl Into<String>) -> Option<Self> {
        let token = Self::new(token);
        if token.inner.trim().is_empty() {
            None
        } else {
            Some(token)
        }
    }

    /// Get the actual token value for transmission or storage.
    ///
    /// # Security Note
    /// Only call this when actually sending the token or persisting it.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get the token length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedToken([REDACTED])")
    }
}

impl fmt::Display for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED TOKEN]")
    }
}

impl Drop for RedactedToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for RedactedToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("RedactedToken cannot be serialized - use as_str() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
