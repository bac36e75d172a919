// Unit tests for error conversion into the CLI error

use crate::error::NimbusError;

use cloud_client::error::{CloudClientError, CoreError};

#[test]
fn given_client_error_when_converted_then_message_passes_through() {
    let client_error = CloudClientError::unauthenticated();
    let expected = client_error.to_string();

    let err: NimbusError = client_error.into();

    assert!(matches!(
        err,
        NimbusError::Core(CoreError::Client(CloudClientError::Unauthenticated { .. }))
    ));
    assert_eq!(err.to_string(), expected);
    assert!(err.to_string().contains("nimbus login"));
}
