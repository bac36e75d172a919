use crate::helpers::TestCloud;

use cloud_client::auth::{USER_PATH, login, logout};
use cloud_client::error::{CloudClientError, CoreError};
use cloud_client::{CredentialStore, resolve};

use common::RedactedToken;
use models::UserInfo;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: End-to-end login: verify over HTTP, persist to disk, logout removes it.
///
/// **WHY THIS MATTERS**: This is the whole credential lifecycle a user goes through.
/// Each step uses the real transport and the real file store.
///
/// **BUG THIS CATCHES**: Would catch login and later calls disagreeing on the
/// endpoint key, or logout deleting the wrong entry.
#[tokio::test]
async fn given_valid_token_when_login_then_logout_then_credentials_round_trip() {
    let cloud = TestCloud::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/{USER_PATH}")))
        .and(header("authorization", "token good-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(UserInfo {
            name: "ada".to_string(),
        }))
        .expect(1)
        .mount(&cloud.server)
        .await;
    let client = cloud.client();
    let endpoint = resolve(&cloud.cloud_url()).unwrap();

    let user = login(&client, &cloud.cloud_url(), &RedactedToken::new("good-token"))
        .await
        .unwrap();

    assert_eq!(user.name, "ada");
    assert_eq!(
        cloud.store().get(&endpoint).unwrap().unwrap().as_str(),
        "good-token"
    );

    logout(&cloud.store(), &format!("{}/", cloud.cloud_url())).unwrap();

    assert!(cloud.store().get(&endpoint).unwrap().is_none());
}

#[tokio::test]
async fn given_rejected_token_when_login_then_no_credentials_file() {
    let cloud = TestCloud::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&cloud.server)
        .await;
    let client = cloud.client();

    let result = login(&client, &cloud.cloud_url(), &RedactedToken::new("bad")).await;

    assert!(matches!(
        result,
        Err(CoreError::Client(CloudClientError::Unauthenticated { .. }))
    ));
    assert!(!cloud.store().path().exists());
}
