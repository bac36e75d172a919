// Test doubles for the transport and credential store seams.

use crate::endpoint::Endpoint;
use crate::error::{CloudClientError, CredentialStoreError};
use crate::{CredentialStore, HttpTransport, PreparedRequest, RawResponse};

use common::{ErrorLocation, HttpStatusCode, RedactedToken};

use std::collections::HashMap;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Mutex;

type Responder = dyn Fn(&PreparedRequest) -> Result<RawResponse, CloudClientError> + Send + Sync;

/// Transport that answers from a closure and records every request it saw.
pub struct MockTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl MockTransport {
    pub fn with<F>(responder: F) -> Self
    where
        F: Fn(&PreparedRequest) -> Result<RawResponse, CloudClientError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(status: u16, body: &'static str) -> Self {
        Self::with(move |request| Ok(raw_response(&request.url.to_string(), status, body)))
    }

    pub fn refusing() -> Self {
        Self::with(|_| {
            Err(CloudClientError::transport(
                "performing HTTP request",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            ))
        })
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> PreparedRequest {
        self.requests().pop().expect("transport was never called")
    }
}

impl HttpTransport for MockTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, CloudClientError> {
        // Give other in-flight calls a chance to interleave.
        tokio::task::yield_now().await;

        let result = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        result
    }
}

pub fn raw_response(url: &str, status: u16, body: &str) -> RawResponse {
    RawResponse {
        url: url.to_string(),
        status: HttpStatusCode(status),
        body: body.as_bytes().to_vec(),
    }
}

/// In-memory credential store; `broken()` fails every operation.
#[derive(Default)]
pub struct MemoryStore {
    tokens: Mutex<HashMap<Endpoint, String>>,
    broken: bool,
}

impl MemoryStore {
    pub fn broken() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            broken: true,
        }
    }

    pub fn with_token(endpoint: &Endpoint, token: &str) -> Self {
        let store = Self::default();
        store
            .tokens
            .lock()
            .unwrap()
            .insert(endpoint.clone(), token.to_string());
        store
    }

    pub fn token_for(&self, endpoint: &Endpoint) -> Option<String> {
        self.tokens.lock().unwrap().get(endpoint).cloned()
    }

    #[track_caller]
    fn check(&self) -> Result<(), CredentialStoreError> {
        if self.broken {
            return Err(CredentialStoreError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: PathBuf::from("memory"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        Ok(())
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, endpoint: &Endpoint) -> Result<Option<RedactedToken>, CredentialStoreError> {
        self.check()?;
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .get(endpoint)
            .map(|token| RedactedToken::new(token.as_str())))
    }

    fn set(&self, endpoint: &Endpoint, token: &RedactedToken) -> Result<(), CredentialStoreError> {
        self.check()?;
        self.tokens
            .lock()
            .unwrap()
            .insert(endpoint.clone(), token.as_str().to_string());
        Ok(())
    }

    fn delete(&self, endpoint: &Endpoint) -> Result<(), CredentialStoreError> {
        self.check()?;
        self.tokens.lock().unwrap().remove(endpoint);
        Ok(())
    }
}
