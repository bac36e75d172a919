use crate::helpers::TestCloud;

use cloud_client::error::CloudClientError;
use cloud_client::{HttpTransport, Method, PreparedRequest, ReqwestTransport};

use std::error::Error;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn request(method: Method, url: &str, body: &str) -> PreparedRequest {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    PreparedRequest {
        method,
        url: Url::parse(url).unwrap(),
        headers,
        body: body.as_bytes().to_vec(),
    }
}

/// **VALUE**: Verifies the production transport sends method, headers, and body,
/// and returns status, full body, and URL untouched.
///
/// **WHY THIS MATTERS**: The decoder's decisions rest entirely on the raw response.
/// If the transport mangled the body or status, every classification would be wrong.
///
/// **BUG THIS CATCHES**: Would catch `error_for_status()` sneaking into the transport,
/// turning 500s into transport errors and losing the error body.
#[tokio::test]
async fn given_mock_server_when_executed_then_raw_response_returned() {
    let cloud = TestCloud::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stacks"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"name":"dev"}"#))
        .respond_with(ResponseTemplate::new(500).set_body_string("  server exploded  "))
        .mount(&cloud.server)
        .await;
    let transport = ReqwestTransport::new(Some(Duration::from_secs(5))).unwrap();
    let url = format!("{}/api/stacks", cloud.server.uri());

    let response = transport
        .execute(request(Method::POST, &url, r#"{"name":"dev"}"#))
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 500);
    assert_eq!(response.body_text(), "  server exploded  ");
    assert_eq!(response.url, url);
}

#[tokio::test]
async fn given_nothing_listening_when_executed_then_transport_error_with_source() {
    let transport = ReqwestTransport::new(Some(Duration::from_secs(5))).unwrap();

    let result = transport
        .execute(request(Method::GET, "http://127.0.0.1:1/api/user", ""))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, CloudClientError::Transport { .. }), "{err:?}");
    let source = err.source().expect("source kept");
    assert!(source.downcast_ref::<reqwest::Error>().is_some());
}

#[tokio::test]
async fn given_slow_server_when_timeout_elapses_then_transport_error() {
    let cloud = TestCloud::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&cloud.server)
        .await;
    let transport = ReqwestTransport::new(Some(Duration::from_millis(200))).unwrap();

    let result = transport
        .execute(request(
            Method::GET,
            &format!("{}/api/user", cloud.server.uri()),
            "",
        ))
        .await;

    let err = result.unwrap_err();
    let source = err.source().and_then(|s| s.downcast_ref::<reqwest::Error>());
    assert!(source.is_some_and(reqwest::Error::is_timeout), "{err:?}");
}
