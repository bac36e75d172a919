use nimbus::cli::CloudUrlArgs;
use nimbus::commands::logout;

use cloud_client::{CloudConfig, CredentialStore, FileCredentialStore, resolve};

use common::RedactedToken;

use tempfile::TempDir;

// ============================================================================
// Integration tests for the logout command against a real credentials file
// ============================================================================

/// **VALUE**: Tests that logout removes only the entry for the chosen cloud.
///
/// **WHY THIS MATTERS**: Users logged in to several clouds share one credentials
/// file. Logging out of one must leave the others usable.
///
/// **BUG THIS CATCHES**: Would catch logout rewriting the file from scratch, or
/// keying the delete by the unresolved URL so nothing is removed.
#[test]
fn given_two_stored_clouds_when_logout_one_then_other_kept() {
    // GIVEN: Credentials for two clouds in a temp home
    let home = TempDir::new().unwrap();
    let config = CloudConfig::with_home_dir(home.path());
    let store = FileCredentialStore::new(home.path());
    let default_endpoint = resolve(&config.api_url).unwrap();
    let other_endpoint = resolve("https://example.org").unwrap();
    store
        .set(&default_endpoint, &RedactedToken::new("default-token"))
        .unwrap();
    store
        .set(&other_endpoint, &RedactedToken::new("other-token"))
        .unwrap();

    // WHEN: Logging out of the configured cloud
    let result = logout::run(&config, &CloudUrlArgs { cloud_url: None });

    // THEN: Only that entry is gone
    assert!(result.is_ok(), "Logout should succeed: {result:?}");
    assert!(store.get(&default_endpoint).unwrap().is_none());
    assert_eq!(
        store.get(&other_endpoint).unwrap().unwrap().as_str(),
        "other-token"
    );
}

#[test]
fn given_nothing_stored_when_logout_then_ok_and_no_file_written() {
    let home = TempDir::new().unwrap();
    let config = CloudConfig::with_home_dir(home.path());

    let result = logout::run(
        &config,
        &CloudUrlArgs {
            cloud_url: Some("https://example.org".to_string()),
        },
    );

    assert!(result.is_ok());
    assert!(!FileCredentialStore::new(home.path()).path().exists());
}

#[test]
fn given_invalid_cloud_url_when_logout_then_error() {
    let home = TempDir::new().unwrap();
    let config = CloudConfig::with_home_dir(home.path());

    let result = logout::run(
        &config,
        &CloudUrlArgs {
            cloud_url: Some("https://example.org/?q=1".to_string()),
        },
    );

    assert!(result.is_err());
}
