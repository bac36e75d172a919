use cloud_client::{CloudClient, FileCredentialStore, ReqwestTransport};

use std::time::Duration;

use tempfile::TempDir;
use wiremock::MockServer;

/// Host the tests pretend to be talking to. DNS for its `api.` form is pinned to
/// the mock server, so endpoint resolution runs exactly as in production.
pub const TEST_HOST: &str = "nimbus.test";

pub struct TestCloud {
    pub server: MockServer,
    pub home: TempDir,
}

impl TestCloud {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            home: TempDir::new().expect("temp home"),
        }
    }

    /// Cloud URL as a user would type it (no `api.` prefix).
    pub fn cloud_url(&self) -> String {
        format!("http://{TEST_HOST}:{}", self.server.address().port())
    }

    pub fn endpoint(&self) -> String {
        format!("http://api.{TEST_HOST}:{}", self.server.address().port())
    }

    pub fn store(&self) -> FileCredentialStore {
        FileCredentialStore::new(self.home.path())
    }

    pub fn client(&self) -> CloudClient<ReqwestTransport, FileCredentialStore> {
        CloudClient::new(self.transport(Some(Duration::from_secs(5))), self.store())
    }

    pub fn transport(&self, timeout: Option<Duration>) -> ReqwestTransport {
        let mut builder = reqwest::Client::builder()
            .resolve(&format!("api.{TEST_HOST}"), *self.server.address());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        ReqwestTransport::from_client(builder.build().expect("test client"))
    }
}
