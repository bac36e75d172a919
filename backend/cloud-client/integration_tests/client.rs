use crate::helpers::TestCloud;

use cloud_client::error::CloudClientError;
use cloud_client::{CredentialStore, Credentials, Method, NO_BODY, resolve};

use common::RedactedToken;
use models::ErrorPayload;

use serde::{Deserialize, Serialize};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Stack {
    name: String,
    resources: u32,
}

#[tokio::test]
async fn given_stored_login_when_rest_call_then_token_sent_and_body_decoded() {
    let cloud = TestCloud::start().await;
    let endpoint = resolve(&cloud.cloud_url()).unwrap();
    cloud
        .store()
        .set(&endpoint, &RedactedToken::new("stored-token"))
        .unwrap();
    Mock::given(method("GET"))
        .and(path("/api/stacks/acme/dev"))
        .and(header("authorization", "token stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Stack {
            name: "dev".to_string(),
            resources: 12,
        }))
        .expect(1)
        .mount(&cloud.server)
        .await;

    let stack: Stack = cloud
        .client()
        .rest_call(
            &cloud.cloud_url(),
            Method::GET,
            "/stacks/acme/dev",
            NO_BODY,
            Credentials::Stored,
        )
        .await
        .unwrap();

    assert_eq!(endpoint.as_str(), cloud.endpoint());
    assert_eq!(stack.resources, 12);
}

#[tokio::test]
async fn given_request_object_when_rest_call_then_json_body_received() {
    let cloud = TestCloud::start().await;
    let stack = Stack {
        name: "prod".to_string(),
        resources: 0,
    };
    Mock::given(method("POST"))
        .and(path("/api/stacks"))
        .and(header("content-type", "application/json"))
        .and(body_json(&stack))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&cloud.server)
        .await;

    cloud
        .client()
        .rest_call_no_content(
            &cloud.cloud_url(),
            Method::POST,
            "stacks",
            Some(&stack),
            Credentials::Anonymous,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn given_401_with_payload_when_rest_call_then_unauthenticated() {
    let cloud = TestCloud::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(ErrorPayload::new(401, "token expired")),
        )
        .mount(&cloud.server)
        .await;

    let result: Result<Stack, _> = cloud
        .client()
        .rest_call(
            &cloud.cloud_url(),
            Method::GET,
            "stacks",
            NO_BODY,
            Credentials::Stored,
        )
        .await;

    assert!(matches!(
        result,
        Err(CloudClientError::Unauthenticated { .. })
    ));
}

#[tokio::test]
async fn given_structured_500_when_rest_call_then_api_error_with_payload() {
    let cloud = TestCloud::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(ErrorPayload::new(500, "boom")))
        .mount(&cloud.server)
        .await;

    let result: Result<Stack, _> = cloud
        .client()
        .rest_call(
            &cloud.cloud_url(),
            Method::GET,
            "stacks",
            NO_BODY,
            Credentials::Anonymous,
        )
        .await;

    let Err(CloudClientError::Api { payload, .. }) = result else {
        panic!("Expected Api error, got {result:?}");
    };
    assert_eq!(payload, ErrorPayload::new(500, "boom"));
}

#[tokio::test]
async fn given_wrong_shape_when_rest_call_then_decode_error() {
    let cloud = TestCloud::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["not","a","stack"]"#))
        .mount(&cloud.server)
        .await;

    let result: Result<Stack, _> = cloud
        .client()
        .rest_call(
            &cloud.cloud_url(),
            Method::GET,
            "stacks",
            NO_BODY,
            Credentials::Anonymous,
        )
        .await;

    assert!(matches!(result, Err(CloudClientError::Decode { .. })));
}
