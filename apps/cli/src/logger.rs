//! Logging for the nimbus command line.
//!
//! Colored output on stderr, keeping stdout for command results, plus an
//! optional plain-text file. Initialization is thread-safe and runs once.

use crate::error::NimbusError;

use common::ErrorLocation;

use std::io::stderr;
use std::panic::Location;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, debug, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

/// Message logged when logger is successfully initialized.
const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

/// Warning message when logger is called multiple times.
const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

/// HTTP stack crates that are far too chatty below info.
const NOISY_DEPENDENCIES: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// Map the `-v` count to a level: none is warn, then info, debug, trace.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger.
///
/// Safe to call more than once: later calls log a warning and return Ok.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or another logger is
/// already installed.
pub fn initialize(verbosity: u8, log_file: Option<&Path>) -> Result<(), NimbusError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let level = level_for_verbosity(verbosity);
    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = build_dispatch(level, log_file).and_then(|dispatch| {
            dispatch.apply().map_err(|e| NimbusError::Nimbus {
                message: format!("Failed to initialize logger: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })
        });
        if result.is_ok() {
            debug!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{level:?}");
        }
    });

    result
}

/// Build the dispatch tree without installing it.
#[track_caller]
pub fn build_dispatch(level: LevelFilter, log_file: Option<&Path>) -> Result<Dispatch, NimbusError> {
    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let dependency_level = level.min(LevelFilter::Info);
    let mut base_dispatch = Dispatch::new().level(level);
    for dependency in NOISY_DEPENDENCIES {
        base_dispatch = base_dispatch.level_for(dependency, dependency_level);
    }

    let stderr_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                target = record.target(),
            ))
        })
        .chain(stderr());

    base_dispatch = base_dispatch.chain(stderr_dispatch);

    if let Some(log_file_path) = log_file {
        let file = fern::log_file(log_file_path).map_err(|e| NimbusError::Nimbus {
            message: format!(
                "Failed to create log file {}: {e}",
                log_file_path.display()
            ),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let file_dispatch = Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message} [{file}:{line}]",
                    date = format_rfc3339(SystemTime::now()),
                    level = record.level(),
                    message = message,
                    file = record.file().unwrap_or("unknown"),
                    line = record.line().unwrap_or(0)
                ))
            })
            .chain(file);

        base_dispatch = base_dispatch.chain(file_dispatch);
    }

    Ok(base_dispatch)
}
