// Unit tests for logger module initialization logic
// Tests focus on level mapping, thread-safety and error handling

use crate::error::NimbusError;
use crate::logger::{build_dispatch, initialize, level_for_verbosity};

use std::path::PathBuf;

use log::LevelFilter;
use tempfile::TempDir;

#[test]
fn given_verbosity_counts_when_mapped_then_levels_escalate() {
    assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
    assert_eq!(level_for_verbosity(1), LevelFilter::Info);
    assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
    assert_eq!(level_for_verbosity(3), LevelFilter::Trace);
    assert_eq!(level_for_verbosity(u8::MAX), LevelFilter::Trace);
}

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Logger setup may be reached from more than one path (main,
/// tests). If the second call errors, the process fails before doing any work.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    let result1 = initialize(0, None);
    let result2 = initialize(3, None);

    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

/// **VALUE**: Verifies that an unwritable log file is reported, not panicked on.
///
/// **WHY THIS MATTERS**: `--log-file` is user input. A typo must produce a clear
/// error instead of crashing on startup.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` is unwrapped instead of
/// mapped into a NimbusError.
#[test]
fn given_invalid_log_file_when_dispatch_built_then_returns_error() {
    let invalid_file = PathBuf::from("/dev/null/invalid-path/nimbus.log");

    let result = build_dispatch(LevelFilter::Info, Some(&invalid_file));

    assert!(matches!(result, Err(NimbusError::Nimbus { .. })));
}

#[test]
fn given_writable_log_file_when_dispatch_built_then_file_created() {
    let dir = TempDir::new().unwrap();
    let log_file = dir.path().join("nimbus.log");

    let result = build_dispatch(LevelFilter::Debug, Some(&log_file));

    assert!(result.is_ok());
    assert!(log_file.exists());
}
