use crate::credentials::CredentialsFile;
use crate::endpoint::resolve;
use crate::error::CredentialStoreError;
use crate::{CredentialStore, FileCredentialStore};

use common::RedactedToken;

use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

fn store() -> (TempDir, FileCredentialStore) {
    let dir = TempDir::new().unwrap();
    let store = FileCredentialStore::new(&dir.path().join("home"));
    (dir, store)
}

#[test]
fn given_no_credentials_file_when_get_then_none() {
    let (_dir, store) = store();
    let endpoint = resolve("https://example.com").unwrap();

    assert!(store.get(&endpoint).unwrap().is_none());
}

#[test]
fn given_token_set_when_get_then_same_token_returned() {
    let (_dir, store) = store();
    let endpoint = resolve("https://example.com").unwrap();

    store.set(&endpoint, &RedactedToken::new("tok-1")).unwrap();

    let token = store.get(&endpoint).unwrap().unwrap();
    assert_eq!(token.as_str(), "tok-1");
}

#[test]
fn given_two_endpoints_when_one_overwritten_then_other_untouched() {
    let (_dir, store) = store();
    let first = resolve("https://one.example.com").unwrap();
    let second = resolve("https://two.example.com").unwrap();

    store.set(&first, &RedactedToken::new("a")).unwrap();
    store.set(&second, &RedactedToken::new("b")).unwrap();
    store.set(&first, &RedactedToken::new("c")).unwrap();

    assert_eq!(store.get(&first).unwrap().unwrap().as_str(), "c");
    assert_eq!(store.get(&second).unwrap().unwrap().as_str(), "b");
}

#[test]
fn given_stored_token_when_deleted_then_absent() {
    let (_dir, store) = store();
    let endpoint = resolve("https://example.com").unwrap();
    store.set(&endpoint, &RedactedToken::new("tok")).unwrap();

    store.delete(&endpoint).unwrap();

    assert!(store.get(&endpoint).unwrap().is_none());
}

#[test]
fn given_nothing_stored_when_deleted_then_ok_and_no_file_created() {
    let (_dir, store) = store();
    let endpoint = resolve("https://example.com").unwrap();

    store.delete(&endpoint).unwrap();

    assert!(!store.path().exists());
}

#[test]
fn given_stored_token_when_file_inspected_then_keyed_by_endpoint() {
    let (_dir, store) = store();
    let endpoint = resolve("https://example.com/").unwrap();

    store.set(&endpoint, &RedactedToken::new("tok")).unwrap();

    let contents = std::fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["access_tokens"]["https://api.example.com"], "tok");
}

#[test]
fn given_blank_token_in_file_when_get_then_treated_as_absent() {
    let (_dir, store) = store();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(
        store.path(),
        r#"{"access_tokens":{"https://api.example.com":""}}"#,
    )
    .unwrap();
    let endpoint = resolve("https://example.com").unwrap();

    assert!(store.get(&endpoint).unwrap().is_none());
}

/// **VALUE**: Verifies a corrupt credentials file is an error, not "logged out".
///
/// **WHY THIS MATTERS**: Silently treating a damaged file as empty would make every
/// call anonymous and a later `set` would overwrite the user's other tokens.
///
/// **BUG THIS CATCHES**: Would catch `unwrap_or_default()` on the parse result.
#[test]
fn given_corrupt_file_when_get_then_parse_error() {
    let (_dir, store) = store();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{ not json").unwrap();
    let endpoint = resolve("https://example.com").unwrap();

    let result = store.get(&endpoint);

    assert!(matches!(result, Err(CredentialStoreError::ParseError { .. })));
}

#[cfg(unix)]
#[test]
fn given_token_set_when_file_written_then_owner_only_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store) = store();
    let endpoint = resolve("https://example.com").unwrap();

    store.set(&endpoint, &RedactedToken::new("tok")).unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

/// **VALUE**: Verifies concurrent writers on one shared store all land on disk.
///
/// **WHY THIS MATTERS**: The store sits inside a client that is shared across
/// tasks. Two logins racing must not drop either token.
///
/// **BUG THIS CATCHES**: Would catch load/modify/save running unlocked (lost
/// updates) or writers sharing one temp path (rename fails with ENOENT).
#[test]
fn given_shared_store_when_many_threads_set_then_every_token_kept() {
    let (_dir, store) = store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let endpoint = resolve(&format!("https://t{i}.example.com")).unwrap();
                store.set(&endpoint, &RedactedToken::new(format!("tok{i}")))
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    for i in 0..16 {
        let endpoint = resolve(&format!("https://t{i}.example.com")).unwrap();
        let token = store.get(&endpoint).unwrap();
        assert_eq!(token.as_ref().map(RedactedToken::as_str), Some(format!("tok{i}").as_str()));
    }
}

#[test]
fn given_cloned_stores_when_set_concurrently_then_both_tokens_kept() {
    let (_dir, store) = store();
    let first = resolve("https://one.example.com").unwrap();
    let second = resolve("https://two.example.com").unwrap();

    thread::scope(|scope| {
        let clone = store.clone();
        let first = &first;
        scope.spawn(move || clone.set(first, &RedactedToken::new("one")).unwrap());
        store.set(&second, &RedactedToken::new("two")).unwrap();
    });

    assert!(store.get(&first).unwrap().is_some());
    assert!(store.get(&second).unwrap().is_some());
}

#[test]
fn given_file_contents_when_debug_formatted_then_tokens_hidden() {
    let mut file = CredentialsFile::default();
    file.access_tokens
        .insert("https://api.example.com".to_string(), "very-secret".to_string());

    let debug = format!("{file:?}");

    assert!(debug.contains("https://api.example.com"));
    assert!(!debug.contains("very-secret"));
}
